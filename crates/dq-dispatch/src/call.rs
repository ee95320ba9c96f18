//! Call and result shapes shared by every handler.

use dq_array::{ComplexUnitArray, OperandRef, ScalarBound, UnitArray};
use dq_units::Unit;
use ndarray::ArrayD;

/// Keyword-style configuration, with the defaults of the numeric library
/// the operations mirror. Each handler reads only the fields it documents.
#[derive(Debug, Clone)]
pub struct CallOptions {
    /// Concatenation/stacking axis.
    pub axis: usize,
    /// Decimal places for rounding.
    pub decimals: i32,
    /// Bin count per dimension for the histogram family.
    pub bins: usize,
    /// Explicit per-dimension bin ranges; each bound must be unit-tagged.
    pub range: Option<Vec<(ScalarBound, ScalarBound)>>,
    /// Percentile (0..=100) or quantile (0..=1) position.
    pub q: f64,
    /// Delta degrees of freedom for variance.
    pub ddof: usize,
    /// Sample count for the spacing family.
    pub num: usize,
    /// Uniform spacing for trapezoid integration when no sample-point
    /// array is given.
    pub dx: ScalarBound,
    /// Relative tolerance for closeness comparisons.
    pub rtol: f64,
    /// Absolute tolerance for closeness comparisons.
    pub atol: f64,
    /// Leading-axis count for tensorinv.
    pub ind: usize,
}

impl Default for CallOptions {
    fn default() -> Self {
        Self {
            axis: 0,
            decimals: 0,
            bins: 10,
            range: None,
            q: 0.5,
            ddof: 0,
            num: 50,
            dx: ScalarBound::bare(1.0),
            rtol: 1e-5,
            atol: 1e-8,
            ind: 2,
        }
    }
}

/// One dispatched invocation: operands, an optional caller-owned output
/// buffer, and keyword configuration.
///
/// `grid` carries the nested operand layout of the block-assembly
/// operation; it is empty for everything else.
pub struct OpCall<'a> {
    pub operands: Vec<OperandRef<'a>>,
    pub grid: Vec<Vec<OperandRef<'a>>>,
    pub out: Option<&'a mut UnitArray>,
    pub opts: CallOptions,
}

impl<'a> OpCall<'a> {
    pub fn new(operands: Vec<OperandRef<'a>>) -> Self {
        Self {
            operands,
            grid: Vec::new(),
            out: None,
            opts: CallOptions::default(),
        }
    }

    pub fn with_out(mut self, out: Option<&'a mut UnitArray>) -> Self {
        self.out = out;
        self
    }

    pub fn with_opts(mut self, opts: CallOptions) -> Self {
        self.opts = opts;
        self
    }

    pub fn with_grid(mut self, grid: Vec<Vec<OperandRef<'a>>>) -> Self {
        self.grid = grid;
        self
    }

    /// The unitless rendition of this call: every operand demoted to bare,
    /// every explicit bound re-tagged dimensionless so raw values pass
    /// straight through. Used by the unregistered-operation fallback.
    pub fn strip_units(self) -> OpCall<'a> {
        let operands = self.operands.iter().map(OperandRef::stripped).collect();
        let grid = self
            .grid
            .iter()
            .map(|row| row.iter().map(OperandRef::stripped).collect())
            .collect();
        let mut opts = self.opts;
        opts.range = opts.range.map(|pairs| {
            pairs
                .into_iter()
                .map(|(lo, hi)| {
                    (
                        ScalarBound::tagged(lo.value, Unit::dimensionless()),
                        ScalarBound::tagged(hi.value, Unit::dimensionless()),
                    )
                })
                .collect()
        });
        opts.dx = ScalarBound::bare(opts.dx.value);
        OpCall {
            operands,
            grid,
            out: self.out,
            opts,
        }
    }
}

/// Histogram output: bare counts plus one tagged edge array per dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramOutcome {
    pub counts: ArrayD<f64>,
    pub edges: Vec<UnitArray>,
}

/// Least-squares output; rank is unit-free.
#[derive(Debug, Clone, PartialEq)]
pub struct LstsqOutcome {
    pub solution: UnitArray,
    pub residuals: UnitArray,
    pub rank: usize,
    pub singular_values: UnitArray,
}

/// Every result shape a handler can produce.
#[derive(Debug, Clone, PartialEq)]
pub enum OpOutcome {
    Array(UnitArray),
    Complex(ComplexUnitArray),
    /// Eigenvalues (tagged) and eigenvectors (dimensionless), complex.
    Eig {
        values: ComplexUnitArray,
        vectors: ComplexUnitArray,
    },
    /// Symmetric eigenvalues (tagged) and eigenvectors (dimensionless).
    Eigh {
        values: UnitArray,
        vectors: UnitArray,
    },
    Lstsq(LstsqOutcome),
    Histogram(HistogramOutcome),
    Mask(ArrayD<bool>),
    Bool(bool),
    /// The call wrote entirely into the caller's buffer.
    Written,
}

#[cfg(test)]
mod tests {
    use super::*;
    use dq_units::meter;
    use ndarray::IxDyn;

    #[test]
    fn strip_units_demotes_everything() {
        let a = UnitArray::from_vec(vec![1.0, 2.0], meter());
        let mut opts = CallOptions::default();
        opts.range = Some(vec![(
            ScalarBound::tagged(0.0, meter()),
            ScalarBound::tagged(1.0, meter()),
        )]);
        let call = OpCall::new(vec![OperandRef::from(&a)]).with_opts(opts);
        let stripped = call.strip_units();
        assert!(!stripped.operands[0].is_tagged());
        let (lo, hi) = &stripped.opts.range.as_ref().unwrap()[0];
        assert!(lo.unit_or_null().is_null());
        assert!(hi.unit_or_null().is_null());
        assert_eq!(lo.value, 0.0);
        assert_eq!(hi.value, 1.0);
    }
}
