//! Core domain: entities, validation, pagination, and the update policy
//!
//! Everything in this module is pure and synchronous. Transport and storage
//! concerns live in `server` and `storage`.

pub mod error;
pub mod pagination;
pub mod pix;
pub mod receiver;
pub mod update;
pub mod validation;

pub use error::{
    NotFoundError, PolicyError, ReceiverError, ReceiverResult, StorageError, ValidationError,
};
pub use pagination::{Connection, DEFAULT_PAGE_SIZE, Edge, PageInfo};
pub use pix::{Pix, PixKeyType};
pub use receiver::{Receiver, Status};
pub use update::{UpdateField, UpdateReceiverInput};
pub use validation::ValidationOptions;
