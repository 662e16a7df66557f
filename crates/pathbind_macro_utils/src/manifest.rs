use std::collections::BTreeMap;
use std::env;
use std::path::PathBuf;
use std::sync::{PoisonError, RwLock};

use toml_edit::{Document, Item, Table};

/// The caller's `Cargo.toml`, used to find how generated code can name a
/// `pathbind` crate.
///
/// # Resolution rules
///
/// 1. If the requested crate is listed in `dependencies`, return `::crate_name`.
/// 2. If the name begins with `pathbind_` and the caller depends on the
///    `pathbind` facade, return `::pathbind::short_name`
///    (e.g. `pathbind_reflect` -> `::pathbind::reflect`).
/// 3. Repeat 1-2 in `dev-dependencies`.
/// 4. Otherwise, fall back to `::crate_name`.
///
/// A crate that needs to reference itself from doctests or tests adds
/// `extern crate self as crate_name;` to its root.
///
/// # Example
///
/// ```rust
/// # use pathbind_macro_utils::Manifest;
/// let p: syn::Path = Manifest::shared(|m| m.get_crate_path("pathbind_reflect"));
/// ```
#[derive(Debug)]
pub struct Manifest {
    manifest: Document<Box<str>>,
}

const FACADE_NAME: &str = "pathbind";
const FACADE_PREFIX: &str = "pathbind_";

impl Manifest {
    #[inline(never)]
    fn manifest_path() -> Option<PathBuf> {
        let mut path = PathBuf::from(env::var_os("CARGO_MANIFEST_DIR")?);
        path.push("Cargo.toml");
        Some(path)
    }

    #[inline(never)]
    fn read(path: &PathBuf) -> Manifest {
        let text = std::fs::read_to_string(path)
            .unwrap_or_else(|_| panic!("Unable to read cargo manifest: {}", path.display()))
            .into_boxed_str();
        let manifest = Document::parse(text)
            .unwrap_or_else(|_| panic!("Failed to parse cargo manifest: {}", path.display()));
        Manifest { manifest }
    }

    #[inline]
    fn parse_path(path: &str) -> syn::Path {
        syn::parse_str(path).unwrap_or_else(|_| panic!("`{path}` is not a valid path"))
    }

    fn find_in_deps(deps: &Table, name: &str) -> Option<syn::Path> {
        if deps.contains_key(name) {
            return Some(Self::parse_path(&format!("::{name}")));
        }
        let module = name.strip_prefix(FACADE_PREFIX)?;
        deps.contains_key(FACADE_NAME)
            .then(|| Self::parse_path(&format!("::{FACADE_NAME}::{module}")))
    }

    /// Returns a [`syn::Path`] for the package `name` as seen from the
    /// caller's crate.
    #[inline(never)]
    pub fn get_crate_path(&self, name: &str) -> syn::Path {
        for section in ["dependencies", "dev-dependencies"] {
            if let Some(Item::Table(deps)) = self.manifest.get(section)
                && let Some(path) = Self::find_in_deps(deps, name)
            {
                return path;
            }
        }

        Self::parse_path(&format!("::{name}"))
    }

    /// Runs `func` against the caller's manifest.
    ///
    /// Manifests are parsed once per path and cached for the lifetime of the
    /// compiler process. Without `CARGO_MANIFEST_DIR` an empty manifest is
    /// used, which resolves every name to `::crate_name`.
    pub fn shared<R>(func: impl FnOnce(&Self) -> R) -> R {
        static MANIFESTS: RwLock<BTreeMap<PathBuf, Manifest>> = RwLock::new(BTreeMap::new());

        let Some(path) = Self::manifest_path().filter(|path| path.exists()) else {
            let empty = Manifest {
                manifest: Document::parse(Box::<str>::default())
                    .unwrap_or_else(|_| panic!("an empty manifest is valid toml")),
            };
            return func(&empty);
        };

        if let Some(manifest) = MANIFESTS
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&path)
        {
            return func(manifest);
        }

        let manifest = Self::read(&path);
        let result = func(&manifest);

        MANIFESTS
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path, manifest);

        result
    }
}
