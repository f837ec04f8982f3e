// File-backed store: one JSON object per file, read and rewritten whole.
// Each call opens the file, does its work and closes it again; nothing is
// cached between calls so the file on disk is always the source of truth.

use crate::error::StoreError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, ErrorKind, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Typed handle on a single JSON store file.
#[derive(Debug, Clone)]
pub struct JsonStore<T> {
    path: PathBuf,
    _data: PhantomData<T>,
}

impl<T> JsonStore<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonStore {
            path: path.into(),
            _data: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the file holding an empty mapping if it is missing.
    /// An existing file is left as is, even if it is unreadable.
    pub fn ensure_exists(&self) -> Result<(), StoreError> {
        if self.path.exists() {
            return Ok(());
        }
        debug!(path = %self.path.display(), "creating empty store");
        self.save(&T::default())
    }

    /// Read and parse the whole store.
    pub fn load(&self) -> Result<T, StoreError> {
        let text = fs::read_to_string(&self.path).map_err(|source| {
            if source.kind() == ErrorKind::NotFound {
                StoreError::NotFound {
                    path: self.path.clone(),
                }
            } else {
                StoreError::Io {
                    path: self.path.clone(),
                    source,
                }
            }
        })?;
        debug!(path = %self.path.display(), bytes = text.len(), "loaded store");
        serde_json::from_str(&text).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    /// Overwrite the store with `data`.
    ///
    /// The JSON is written to `<file>.tmp`, flushed to disk and then renamed
    /// over the target. A crash or power loss mid-write leaves either the
    /// old or the new content in place, never a truncated file. The rename
    /// itself is not fsynced, so after a power loss the old content may win.
    pub fn save(&self, data: &T) -> Result<(), StoreError> {
        let bytes = to_pretty_json(data).map_err(|source| self.io_error(source))?;
        let tmp = self.tmp_path();
        write_synced(&tmp, &bytes).map_err(|source| self.io_error(source))?;
        fs::rename(&tmp, &self.path).map_err(|source| self.io_error(source))?;
        debug!(path = %self.path.display(), bytes = bytes.len(), "saved store");
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".tmp");
        PathBuf::from(name)
    }

    fn io_error(&self, source: io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

fn write_synced(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

/// Serialize with a four-space indent, the layout the legacy files use.
fn to_pretty_json<T: Serialize>(data: &T) -> io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    data.serialize(&mut ser).map_err(io::Error::from)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Booking, Movie, MovieRegistry, User, UserRegistry};
    use proptest::prelude::*;
    use tempfile::TempDir;

    fn users_store(dir: &TempDir) -> JsonStore<UserRegistry> {
        JsonStore::new(dir.path().join("users.json"))
    }

    #[test]
    fn ensure_exists_creates_empty_object() {
        let dir = TempDir::new().unwrap();
        let store = users_store(&dir);
        store.ensure_exists().unwrap();

        assert_eq!(fs::read_to_string(store.path()).unwrap(), "{}");
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn ensure_exists_keeps_existing_content() {
        let dir = TempDir::new().unwrap();
        let store = users_store(&dir);
        fs::write(store.path(), r#"{"bob": {"movies_watched": []}}"#).unwrap();

        store.ensure_exists().unwrap();
        assert!(store.load().unwrap().contains_key("bob"));
    }

    #[test]
    fn load_missing_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let err = users_store(&dir).load().unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[test]
    fn load_garbage_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let store = users_store(&dir);
        fs::write(store.path(), "{ not json").unwrap();
        assert!(matches!(store.load().unwrap_err(), StoreError::Parse { .. }));

        // Valid JSON of the wrong shape is rejected too.
        fs::write(store.path(), "[1, 2]").unwrap();
        assert!(matches!(store.load().unwrap_err(), StoreError::Parse { .. }));
    }

    #[test]
    fn save_uses_four_space_indent_and_leaves_no_tmp_file() {
        let dir = TempDir::new().unwrap();
        let store: JsonStore<MovieRegistry> = JsonStore::new(dir.path().join("movies.json"));
        let mut movies = MovieRegistry::new();
        movies.insert("M1".into(), Movie::new(vec!["A1".into()]));
        store.save(&movies).unwrap();

        let text = fs::read_to_string(store.path()).unwrap();
        assert!(text.starts_with("{\n    \"M1\": {\n        \"total_seats\""));
        assert!(!dir.path().join("movies.json.tmp").exists());
    }

    #[test]
    fn save_replaces_previous_content_and_ignores_stale_tmp() {
        let dir = TempDir::new().unwrap();
        let store = users_store(&dir);
        store.ensure_exists().unwrap();
        // Leftover from an interrupted write.
        fs::write(dir.path().join("users.json.tmp"), "{ half writ").unwrap();

        let mut users = UserRegistry::new();
        users.insert("carol".into(), User::default());
        store.save(&users).unwrap();

        assert_eq!(store.load().unwrap(), users);
        assert!(!dir.path().join("users.json.tmp").exists());
    }

    #[test]
    fn reads_legacy_file() {
        let dir = TempDir::new().unwrap();
        let store = users_store(&dir);
        fs::write(
            store.path(),
            "{\n    \"alice\": {\n        \"movies_watched\": [\n            {\n                \"movie_id\": \"M1\",\n                \"seat\": \"A1\"\n            }\n        ]\n    }\n}",
        )
        .unwrap();

        let users = store.load().unwrap();
        assert_eq!(
            users["alice"].movies_watched,
            vec![Booking {
                movie_id: "M1".into(),
                seat: "A1".into()
            }]
        );
    }

    fn arb_users() -> impl Strategy<Value = UserRegistry> {
        let booking = ("[A-Z][0-9]{1,2}", "[A-C][0-9]").prop_map(|(movie_id, seat)| Booking {
            movie_id,
            seat,
        });
        let user = prop::collection::vec(booking, 0..4).prop_map(|movies_watched| User {
            movies_watched,
        });
        prop::collection::btree_map(".{0,12}", user, 0..6)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn save_then_load_round_trips(users in arb_users()) {
            let dir = TempDir::new().unwrap();
            let store = users_store(&dir);
            store.save(&users).unwrap();
            prop_assert_eq!(store.load().unwrap(), users);
        }
    }
}
