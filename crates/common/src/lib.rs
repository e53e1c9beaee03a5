//! Pieces shared by every crate in the workspace: logging setup and small
//! transport types.

pub mod types;

pub mod utils {
    pub mod logging;
}
