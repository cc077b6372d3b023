use std::num::NonZeroU16;

use crate::{
    Error,
    Result,
};

pub fn stderr_columns() -> Result<NonZeroU16> {
    Err(Error::Unsupported)
}
