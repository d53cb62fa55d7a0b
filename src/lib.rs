//! Load a config file of any common encoding into a declared tree of typed
//! options.
//!
//! Treefig reads one file, decodes it into a generic [`Mapping`] (JSON, TOML,
//! YAML, or whichever of them accepts the bytes), then walks a [`Schema`] of
//! options against that mapping, coercing each leaf value and writing it into
//! your config struct.
//!
//! ```ignore
//! #[derive(Default)]
//! struct AppConfig {
//!     server: Server,
//! }
//!
//! #[derive(Default)]
//! struct Server {
//!     host: String,
//!     port: u16,
//! }
//!
//! let schema = Schema::new(vec![Opt::parent(
//!     "server",
//!     vec![
//!         Opt::leaf("host", |c: &mut AppConfig| &mut c.server.host),
//!         Opt::leaf("port", |c: &mut AppConfig| &mut c.server.port),
//!     ],
//! )])?;
//!
//! let mut config = AppConfig::default();
//! Loader::new(schema).load_into("app.yaml", &mut config)?;
//! ```
//!
//! # The option tree
//!
//! Each [`Opt`] names the key it expects at its level of the file.
//!
//! - **Leaf options** ([`Opt::leaf`]) point at a field of your struct. The
//!   value found in the file is converted with [`FromValue`] and stored
//!   there. Use [`Opt::leaf_with`] when the target needs custom handling.
//! - **Parent options** ([`Opt::parent`]) group sub-options. Their value in
//!   the file must be a nested mapping; a scalar or sequence where a mapping
//!   is expected fails the load and names the option's dotted path
//!   (`server.tls`) and the type actually found.
//!
//! Options are visited in the order they were declared. Keys missing from
//! the file are skipped: defaults are whatever your struct held before the
//! load. Keys the schema doesn't mention are ignored unless strict mode is
//! on.
//!
//! # Choosing a decoder
//!
//! 1. A decoder set with [`Loader::decoder`] is always used. The file
//!    extension is not consulted.
//! 2. Otherwise the extension picks one: `json`, `toml`, `yaml` or `yml`.
//!    The match is exact and case-sensitive.
//! 3. Anything else (no extension, `.conf`, `.JSON`) goes through
//!    [`TryAll`]: JSON, then TOML, then YAML, first success wins. If none
//!    succeeds, the error lists why each one failed.
//!
//! Any type implementing [`Decoder`] can be plugged in.
//!
//! # Coercion
//!
//! [`FromValue`] is implemented for strings, paths, bools, every primitive
//! integer, `f32`/`f64`, `Option<T>`, `Vec<T>`, [`Mapping`] and [`Value`].
//! Integer targets are range-checked. See the [`coerce`] module for the full
//! table.
//!
//! # Failure and partial writes
//!
//! The first error anywhere stops the load. [`Loader::load_into`] writes as
//! it walks, so options handled before the failing one keep their new
//! values. [`Loader::load_atomic`] works on a copy and only replaces your
//! struct when everything succeeded.
//!
//! # Strict mode
//!
//! Off by default. With [`Loader::strict(true)`](Loader::strict), keys with
//! no matching option fail the load before anything is written, each
//! reported by its dotted path.
//!
//! # Error handling
//!
//! Every failure is an [`Error`] whose message locates the problem: the file
//! path, the option's dotted path, and the expected versus actual type.
//! [`walk::populate`] can be used directly on an in-memory mapping; it
//! returns [`WalkError`] without file context.

pub mod coerce;
pub mod decode;
pub mod error;
pub mod value;
pub mod walk;

mod file;
mod loader;
mod option;

#[cfg(test)]
mod fixtures;

pub use coerce::{CoerceError, FromValue};
pub use decode::{DecodeError, Decoder, Format, Json, Toml, TryAll, Yaml, select_decoder};
pub use error::{Error, WalkError};
pub use file::read_config_file;
pub use loader::Loader;
pub use option::{Opt, Schema};
pub use value::{Mapping, Value};
