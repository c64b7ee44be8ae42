//! Maven publishing plan for jarpub.
//!
//! Given a merged POM and the declarations of a publication, this crate
//! derives the published coordinate, resolves the repository endpoints the
//! publication goes to, and computes the upload targets and the file set a
//! repository is expected to hold afterwards. Nothing here touches the
//! network.

pub mod checksum;
pub mod coordinate;
pub mod declaration;
pub mod endpoint;
pub mod layout;
pub mod naming;
pub mod publication;
pub mod verify;

pub use coordinate::Coordinate;
pub use declaration::Declaration;
pub use endpoint::{EndpointResolver, RemoteEndpoint, RepoEndpoint};
pub use publication::{Publication, UploadTarget};
