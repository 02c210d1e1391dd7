//! Path resolution: translating request URL paths to filesystem paths.
//!
//! # Responsibilities
//! - Percent-decode the raw request path exactly once
//! - Match the decoded path against the mount table (first match wins)
//! - Compose the target filesystem path
//!
//! # Design Decisions
//! - Decoding happens before matching, so encoded and literal characters
//!   route identically
//! - First match wins in declaration order, not longest prefix
//! - Prefix matching is plain string-prefix matching; `/docs` also
//!   matches `/docsother`
//! - `..` segments are passed through untouched; this is a local
//!   development tool, and containment is deliberately not enforced

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use percent_encoding::percent_decode_str;

/// A single URL-prefix to directory mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mount {
    /// URL path prefix, e.g. `/docs`.
    pub prefix: String,
    /// Absolute directory served under the prefix.
    pub dir: PathBuf,
}

/// Ordered mount table. Match order is declaration order, which matters
/// when prefixes overlap.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    mounts: Vec<Mount>,
}

impl RouteTable {
    pub fn new(mounts: Vec<Mount>) -> Self {
        Self { mounts }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Mount> {
        self.mounts.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.mounts.is_empty()
    }

    /// First mount whose prefix is a string-prefix of `path`, along with
    /// the remainder of `path` after the prefix.
    fn first_match<'a, 'p>(&'a self, path: &'p str) -> Option<(&'a Mount, &'p str)> {
        self.mounts
            .iter()
            .find(|m| path.starts_with(&m.prefix))
            .map(|m| (m, &path[m.prefix.len()..]))
    }
}

/// How a request path was translated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    /// A configured mount (or the single root) matched.
    Mounted { prefix: String, path: PathBuf },
    /// No mount matched; the path is anchored under the fallback root.
    Fallback { path: PathBuf },
}

impl Resolved {
    pub fn path(&self) -> &Path {
        match self {
            Resolved::Mounted { path, .. } | Resolved::Fallback { path } => path,
        }
    }

    pub fn into_path(self) -> PathBuf {
        match self {
            Resolved::Mounted { path, .. } | Resolved::Fallback { path } => path,
        }
    }
}

/// Translates request URL paths into filesystem paths.
///
/// Built once at startup, immutable afterwards, and shared read-only
/// across request tasks; `resolve` does no I/O and cannot fail.
#[derive(Debug, Clone)]
pub enum PathResolver {
    /// Every request is anchored under one root. There is no fallback
    /// branch in this mode.
    SingleRoot { root: PathBuf },
    /// Prefix table with a fallback root for unmatched paths. Unmapped
    /// paths are still servable, relative to the fallback root.
    MultiRoot {
        table: RouteTable,
        fallback_root: PathBuf,
    },
}

impl PathResolver {
    pub fn single_root(root: PathBuf) -> Self {
        PathResolver::SingleRoot { root }
    }

    pub fn multi_root(table: RouteTable, fallback_root: PathBuf) -> Self {
        PathResolver::MultiRoot {
            table,
            fallback_root,
        }
    }

    /// Translate a raw (still percent-encoded) request path.
    ///
    /// Invalid escape sequences pass through literally; invalid UTF-8
    /// decodes to U+FFFD. A nonsense path never fails resolution, it
    /// just resolves to a file that does not exist.
    pub fn resolve(&self, raw_path: &str) -> Resolved {
        let decoded: Cow<'_, str> = percent_decode_str(raw_path).decode_utf8_lossy();

        match self {
            PathResolver::SingleRoot { root } => Resolved::Mounted {
                prefix: String::new(),
                path: root.join(decoded.trim_start_matches('/')),
            },
            PathResolver::MultiRoot {
                table,
                fallback_root,
            } => match table.first_match(&decoded) {
                Some((mount, rest)) => Resolved::Mounted {
                    prefix: mount.prefix.clone(),
                    path: mount.dir.join(rest.trim_start_matches('/')),
                },
                None => Resolved::Fallback {
                    path: fallback_root.join(decoded.trim_start_matches('/')),
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs_resolver() -> PathResolver {
        let table = RouteTable::new(vec![Mount {
            prefix: "/docs".to_string(),
            dir: PathBuf::from("/srv/docs"),
        }]);
        PathResolver::multi_root(table, PathBuf::from("/work"))
    }

    #[test]
    fn mounted_prefix_joins_remainder() {
        let resolved = docs_resolver().resolve("/docs/readme.txt");
        assert_eq!(
            resolved,
            Resolved::Mounted {
                prefix: "/docs".to_string(),
                path: PathBuf::from("/srv/docs/readme.txt"),
            }
        );
    }

    #[test]
    fn unmatched_path_takes_deterministic_fallback() {
        let resolved = docs_resolver().resolve("/other/file.txt");
        assert_eq!(
            resolved,
            Resolved::Fallback {
                path: PathBuf::from("/work/other/file.txt"),
            }
        );
    }

    #[test]
    fn percent_decoding_happens_before_matching() {
        // "/d%6fcs" decodes to "/docs" and must hit the mount.
        let resolved = docs_resolver().resolve("/d%6fcs/a.txt");
        assert_eq!(resolved.path(), Path::new("/srv/docs/a.txt"));

        // "%20" in the remainder becomes a literal space.
        let resolved = docs_resolver().resolve("/docs/%20x");
        assert_eq!(resolved.path(), Path::new("/srv/docs/ x"));
    }

    #[test]
    fn invalid_escapes_pass_through_literally() {
        let resolved = docs_resolver().resolve("/docs/100%zz");
        assert_eq!(resolved.path(), Path::new("/srv/docs/100%zz"));
    }

    #[test]
    fn first_match_wins_over_longer_prefix() {
        let table = RouteTable::new(vec![
            Mount {
                prefix: "/a".to_string(),
                dir: PathBuf::from("/one"),
            },
            Mount {
                prefix: "/ab".to_string(),
                dir: PathBuf::from("/two"),
            },
        ]);
        let resolver = PathResolver::multi_root(table, PathBuf::from("/work"));

        // "/ab/file" string-prefix-matches "/a" first; declaration order
        // wins, not the longer prefix.
        assert_eq!(resolver.resolve("/ab/file").path(), Path::new("/one/b/file"));

        let reversed = RouteTable::new(vec![
            Mount {
                prefix: "/ab".to_string(),
                dir: PathBuf::from("/two"),
            },
            Mount {
                prefix: "/a".to_string(),
                dir: PathBuf::from("/one"),
            },
        ]);
        let resolver = PathResolver::multi_root(reversed, PathBuf::from("/work"));
        assert_eq!(resolver.resolve("/ab/file").path(), Path::new("/two/file"));
    }

    #[test]
    fn prefix_match_is_string_prefix_not_segment() {
        // "/docs" also matches "/docsother"; matching is not
        // segment-aware.
        let resolved = docs_resolver().resolve("/docsother");
        assert_eq!(resolved.path(), Path::new("/srv/docs/other"));
    }

    #[test]
    fn single_root_strips_all_leading_slashes() {
        let resolver = PathResolver::single_root(PathBuf::from("/srv/site"));
        assert_eq!(
            resolver.resolve("/sub/file.txt").path(),
            Path::new("/srv/site/sub/file.txt")
        );
        assert_eq!(
            resolver.resolve("///file.txt").path(),
            Path::new("/srv/site/file.txt")
        );
    }

    #[test]
    fn single_root_never_falls_back() {
        let resolver = PathResolver::single_root(PathBuf::from("/srv/site"));
        match resolver.resolve("/anything/at/all") {
            Resolved::Mounted { .. } => {}
            Resolved::Fallback { .. } => panic!("single-root mode has no fallback branch"),
        }
    }

    #[test]
    fn dot_dot_segments_pass_through() {
        // Permissive by design; see module docs.
        let resolved = docs_resolver().resolve("/docs/../escape.txt");
        assert_eq!(resolved.path(), Path::new("/srv/docs/../escape.txt"));
    }

    #[test]
    fn resolution_is_idempotent() {
        let resolver = docs_resolver();
        assert_eq!(resolver.resolve("/docs/x"), resolver.resolve("/docs/x"));
    }
}
