//! Error types for maze generation, meshing and export.
//!
//! `error_chain!` creates the `Error`, `ErrorKind`, `ResultExt` and `Result` types.
//! Other modules `use crate::errors::*;` to get at all of them.

#![allow(deprecated)] // error_chain still implements Error::description

error_chain! {

    foreign_links {
        Io(::std::io::Error);
        Json(::serde_json::Error);
    }

    errors {
        InvalidDimension(width: usize, height: usize) {
            description("invalid maze dimensions")
            display("invalid maze dimensions {}x{}: width and height must be at least 1", width, height)
        }

        WorkerLost {
            description("maze worker thread ended without a result")
            display("maze worker thread ended without delivering a result")
        }
    }
}
