pub mod client;
pub mod factory;
pub mod memory;
pub mod s3;

use std::fmt;
use std::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};

// StorageVia selects the object store behind the storage client
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Copy)]
pub enum StorageVia {
    #[serde(rename = "s3")]
    S3,
    #[serde(rename = "memory")]
    Memory,
}

// PathName lists the fixed key namespaces objects are stored under
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum PathName {
    BookImages,
}

impl Display for PathName {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            PathName::BookImages => write!(f, "book-images"),
        }
    }
}
