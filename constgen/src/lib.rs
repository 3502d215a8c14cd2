/*!

Generates `const_generated.go`, the Go source file holding the operator's user facing name,
version and default image tags. Every value comes from a required environment variable; the
file is only written once all of them have been read.

!*/

pub mod consts;
pub mod env;
pub mod error;
pub mod generator;
pub mod render;

pub use consts::ImageConstants;
pub use env::{EnvSource, ProcessEnv};
pub use generator::Generator;
