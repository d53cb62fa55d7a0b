use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use crate::decode::{self, Decoder};
use crate::error::{Error, WalkError};
use crate::file;
use crate::option::Schema;
use crate::walk;

/// Loads a config file into a config struct through an option [`Schema`].
///
/// ```ignore
/// let loader = Loader::new(schema).strict(true);
/// let mut config = AppConfig::default();
/// loader.load_into("app.yaml", &mut config)?;
/// ```
pub struct Loader<C> {
    schema: Schema<C>,
    decoder: Option<Arc<dyn Decoder>>,
    strict: bool,
}

impl<C> Loader<C> {
    pub fn new(schema: Schema<C>) -> Self {
        Self {
            schema,
            decoder: None,
            strict: false,
        }
    }

    /// Always decode with `decoder`, regardless of the file extension.
    pub fn decoder<D: Decoder + 'static>(mut self, decoder: D) -> Self {
        self.decoder = Some(Arc::new(decoder));
        self
    }

    /// Enable or disable strict mode (default: `false`).
    /// In strict mode, keys no option claims fail the load before anything
    /// is written.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn schema(&self) -> &Schema<C> {
        &self.schema
    }

    /// Read, decode and walk the file at `path`, writing into `config`.
    ///
    /// Values are written as the walk goes: on error, options handled before
    /// the failing one keep their new values. Use
    /// [`load_atomic`](Self::load_atomic) to avoid that.
    pub fn load_into(&self, path: impl AsRef<Path>, config: &mut C) -> Result<(), Error> {
        let path = path.as_ref();
        let bytes = file::read_config_file(path)?;
        self.load_bytes(&bytes, path, config)
    }

    /// Like [`load_into`](Self::load_into), but `config` is only touched if
    /// the whole load succeeds.
    pub fn load_atomic(&self, path: impl AsRef<Path>, config: &mut C) -> Result<(), Error>
    where
        C: Clone,
    {
        let mut staged = config.clone();
        self.load_into(path, &mut staged)?;
        *config = staged;
        Ok(())
    }

    /// Decode and walk bytes already in memory. `name` supplies the
    /// extension used for decoder selection and the path shown in errors.
    pub fn load_bytes(
        &self,
        bytes: &[u8],
        name: impl AsRef<Path>,
        config: &mut C,
    ) -> Result<(), Error> {
        let path = name.as_ref();
        let decoder = decode::select_decoder(self.decoder.as_ref(), path);
        let mapping = decoder.decode(bytes).map_err(|source| Error::Decode {
            path: path.to_path_buf(),
            source,
        })?;

        let options_error = |source: WalkError| Error::Options {
            path: path.to_path_buf(),
            source,
        };

        if self.strict {
            let unknown = walk::unknown_keys(&mapping, self.schema.opts());
            if !unknown.is_empty() {
                return Err(options_error(WalkError::UnknownKeys(unknown)));
            }
        }

        walk::populate(&mapping, self.schema.opts(), config).map_err(options_error)?;
        debug!(path = %path.display(), decoder = decoder.name(), "config loaded");
        Ok(())
    }
}
