use crate::dimension::Dimensions;
use crate::unit::Unit;
use thiserror::Error;

pub type UnitsResult<T> = Result<T, UnitsError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum UnitsError {
    #[error("Unknown unit symbol: {symbol}")]
    UnknownSymbol { symbol: String },

    #[error(
        "Cannot convert between {from} (dimensions: {from_dims}) and {to} (dimensions: {to_dims})"
    )]
    Conversion {
        from: Unit,
        from_dims: Dimensions,
        to: Unit,
        to_dims: Dimensions,
    },
}
