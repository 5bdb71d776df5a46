//! Errors that stop a run before any mix is archived.

use derive_more::{Display, Error};
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, exn::Exn<ErrorKind>>;

#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    #[display("invalid configuration")]
    Config,
    #[display("cannot use archive directory {}", _0.display())]
    Archive(#[error(not(source))] PathBuf),
    #[display("cannot create HTTP client")]
    Client,
    #[display("cannot work out which mixes are missing")]
    Catalog,
}
