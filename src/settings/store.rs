use crate::settings::parse_settings;
use crate::settings::to_document;
use crate::settings::Settings;
use crate::settings::SettingsError;

use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;

use tracing::debug;
use tracing::info;

/// Backing storage for the settings document.
pub trait Document {
    /// A name for the document in error messages
    fn name(&self) -> String;

    /// The whole document.  A missing document is an `io::ErrorKind::NotFound` error.
    fn read(&mut self) -> io::Result<String>;

    /// Replace the document with `contents`.
    fn write(&mut self, contents: &str) -> io::Result<()>;
}

#[derive(Clone, Debug)]
pub struct FileDocument {
    path: PathBuf,
}

impl FileDocument {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        FileDocument {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl Document for FileDocument {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    fn read(&mut self) -> io::Result<String> {
        fs::read_to_string(&self.path)
    }

    fn write(&mut self, contents: &str) -> io::Result<()> {
        // fs::write truncates
        fs::write(&self.path, contents)
    }
}

pub struct SettingsStore<D: Document = FileDocument> {
    document: D,
}

impl SettingsStore<FileDocument> {
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        SettingsStore::new(FileDocument::new(path))
    }
}

impl<D: Document> SettingsStore<D> {
    pub fn new(document: D) -> Self {
        SettingsStore { document }
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    /// Load settings, creating the document with defaults if it does not exist yet.
    pub fn load(&mut self) -> Result<Settings, SettingsError> {
        let source = match self.read() {
            Ok(s) => s,
            Err(SettingsError::NotFound(name)) => {
                info!("settings document {} not found, writing defaults", name);

                let settings = Settings::default();
                self.save(&settings)?;

                return Ok(settings);
            }
            Err(e) => return Err(e),
        };

        let settings = parse_settings(&source, Settings::default())?;

        debug!("loaded settings {:?} from {}", settings, self.document.name());

        Ok(settings)
    }

    pub fn save(&mut self, settings: &Settings) -> Result<(), SettingsError> {
        let document = to_document(settings);

        self.document
            .write(&document)
            .map_err(|e| SettingsError::Unwritable(self.document.name(), e))
    }

    fn read(&mut self) -> Result<String, SettingsError> {
        self.document.read().map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => SettingsError::NotFound(self.document.name()),
            _ => SettingsError::Unreadable(self.document.name(), e),
        })
    }
}
