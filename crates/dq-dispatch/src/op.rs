//! Stable operation identifiers.
//!
//! One variant per registered numeric operation. The identifier is the
//! registry key and the name shown in unit errors and logs.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpId {
    // products
    Dot,
    Vdot,
    Inner,
    Outer,
    Kron,
    Cross,
    Trapz,
    Prod,
    // inverses
    Inv,
    Pinv,
    TensorInv,
    // homogeneous-units family
    Concatenate,
    Stack,
    Vstack,
    Hstack,
    Dstack,
    ColumnStack,
    Block,
    Intersect1d,
    Union1d,
    Linspace,
    Logspace,
    Geomspace,
    // binning
    Histogram,
    Histogram2d,
    HistogramDd,
    // pass-through
    Around,
    SortComplex,
    Norm,
    Trace,
    Percentile,
    Quantile,
    NanPercentile,
    NanQuantile,
    Var,
    CopyTo,
    // transforms
    Fft,
    Fft2,
    Fftn,
    Rfft,
    Rfft2,
    Rfftn,
    Hfft,
    Ifft,
    Ifft2,
    Ifftn,
    Irfft,
    Irfft2,
    Irfftn,
    Ihfft,
    FftShift,
    IfftShift,
    // linear systems
    Det,
    Solve,
    TensorSolve,
    Lstsq,
    Eig,
    Eigh,
    Eigvals,
    Eigvalsh,
    // comparisons
    IsClose,
    AllClose,
}

impl OpId {
    pub fn name(self) -> &'static str {
        match self {
            OpId::Dot => "dot",
            OpId::Vdot => "vdot",
            OpId::Inner => "inner",
            OpId::Outer => "outer",
            OpId::Kron => "kron",
            OpId::Cross => "cross",
            OpId::Trapz => "trapz",
            OpId::Prod => "prod",
            OpId::Inv => "inv",
            OpId::Pinv => "pinv",
            OpId::TensorInv => "tensorinv",
            OpId::Concatenate => "concatenate",
            OpId::Stack => "stack",
            OpId::Vstack => "vstack",
            OpId::Hstack => "hstack",
            OpId::Dstack => "dstack",
            OpId::ColumnStack => "column_stack",
            OpId::Block => "block",
            OpId::Intersect1d => "intersect1d",
            OpId::Union1d => "union1d",
            OpId::Linspace => "linspace",
            OpId::Logspace => "logspace",
            OpId::Geomspace => "geomspace",
            OpId::Histogram => "histogram",
            OpId::Histogram2d => "histogram2d",
            OpId::HistogramDd => "histogramdd",
            OpId::Around => "around",
            OpId::SortComplex => "sort_complex",
            OpId::Norm => "norm",
            OpId::Trace => "trace",
            OpId::Percentile => "percentile",
            OpId::Quantile => "quantile",
            OpId::NanPercentile => "nanpercentile",
            OpId::NanQuantile => "nanquantile",
            OpId::Var => "var",
            OpId::CopyTo => "copyto",
            OpId::Fft => "fft",
            OpId::Fft2 => "fft2",
            OpId::Fftn => "fftn",
            OpId::Rfft => "rfft",
            OpId::Rfft2 => "rfft2",
            OpId::Rfftn => "rfftn",
            OpId::Hfft => "hfft",
            OpId::Ifft => "ifft",
            OpId::Ifft2 => "ifft2",
            OpId::Ifftn => "ifftn",
            OpId::Irfft => "irfft",
            OpId::Irfft2 => "irfft2",
            OpId::Irfftn => "irfftn",
            OpId::Ihfft => "ihfft",
            OpId::FftShift => "fftshift",
            OpId::IfftShift => "ifftshift",
            OpId::Det => "det",
            OpId::Solve => "solve",
            OpId::TensorSolve => "tensorsolve",
            OpId::Lstsq => "lstsq",
            OpId::Eig => "eig",
            OpId::Eigh => "eigh",
            OpId::Eigvals => "eigvals",
            OpId::Eigvalsh => "eigvalsh",
            OpId::IsClose => "isclose",
            OpId::AllClose => "allclose",
        }
    }

    /// Every known operation identifier.
    pub const ALL: [OpId; 62] = [
        OpId::Dot,
        OpId::Vdot,
        OpId::Inner,
        OpId::Outer,
        OpId::Kron,
        OpId::Cross,
        OpId::Trapz,
        OpId::Prod,
        OpId::Inv,
        OpId::Pinv,
        OpId::TensorInv,
        OpId::Concatenate,
        OpId::Stack,
        OpId::Vstack,
        OpId::Hstack,
        OpId::Dstack,
        OpId::ColumnStack,
        OpId::Block,
        OpId::Intersect1d,
        OpId::Union1d,
        OpId::Linspace,
        OpId::Logspace,
        OpId::Geomspace,
        OpId::Histogram,
        OpId::Histogram2d,
        OpId::HistogramDd,
        OpId::Around,
        OpId::SortComplex,
        OpId::Norm,
        OpId::Trace,
        OpId::Percentile,
        OpId::Quantile,
        OpId::NanPercentile,
        OpId::NanQuantile,
        OpId::Var,
        OpId::CopyTo,
        OpId::Fft,
        OpId::Fft2,
        OpId::Fftn,
        OpId::Rfft,
        OpId::Rfft2,
        OpId::Rfftn,
        OpId::Hfft,
        OpId::Ifft,
        OpId::Ifft2,
        OpId::Ifftn,
        OpId::Irfft,
        OpId::Irfft2,
        OpId::Irfftn,
        OpId::Ihfft,
        OpId::FftShift,
        OpId::IfftShift,
        OpId::Det,
        OpId::Solve,
        OpId::TensorSolve,
        OpId::Lstsq,
        OpId::Eig,
        OpId::Eigh,
        OpId::Eigvals,
        OpId::Eigvalsh,
        OpId::IsClose,
        OpId::AllClose,
    ];
}

impl fmt::Display for OpId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn names_are_unique() {
        let mut seen = HashSet::new();
        for op in OpId::ALL {
            assert!(seen.insert(op.name()), "duplicate op name: {op}");
        }
    }
}
