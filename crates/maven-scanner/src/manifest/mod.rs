//! Manifest 탐색 -- 파일 시스템과 `.jar` 아카이브에서 `pom.xml` 수집
//!
//! [`ManifestLocator`]는 두 가지 독립적인 탐색을 수행합니다.
//!
//! 1. 프로젝트 루트 아래에서 이름이 정확히 `pom.xml`인 파일 (경로순 정렬)
//! 2. `*.jar` 파일 (경로순 정렬) 내부에서 경로에 `pom.xml`이 포함된 항목 (아카이브 순서)
//!
//! 파일 시스템 manifest가 먼저, 아카이브 manifest가 뒤에 옵니다.
//! 모든 함수는 동기 I/O이므로 `tokio::task::spawn_blocking` 내에서 호출해야 합니다.

pub mod archive;

use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;
use walkdir::WalkDir;

use crate::error::MavenScannerError;

/// manifest 파일 이름
pub const MANIFEST_FILE_NAME: &str = "pom.xml";

/// 아카이브 확장자
pub const ARCHIVE_EXTENSION: &str = "jar";

/// manifest 위치
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ManifestOrigin {
    /// 파일 시스템의 파일
    File {
        /// 파일 경로
        path: PathBuf,
    },
    /// 아카이브 내부 항목
    Archive {
        /// 아카이브 경로
        archive: PathBuf,
        /// 아카이브 내 항목 이름
        entry: String,
    },
}

impl ManifestOrigin {
    /// 아카이브 내부 manifest인지 반환합니다.
    pub fn is_archive(&self) -> bool {
        matches!(self, Self::Archive { .. })
    }
}

impl fmt::Display for ManifestOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File { path } => write!(f, "{}", path.display()),
            Self::Archive { archive, entry } => write!(f, "{}!{entry}", archive.display()),
        }
    }
}

/// 의존성 manifest 한 건
///
/// 읽은 뒤에는 변경되지 않습니다. 내용은 해석 없이 그대로 전달됩니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    /// manifest 위치
    pub origin: ManifestOrigin,
    /// manifest 원문
    pub content: String,
}

/// manifest 탐색기
#[derive(Debug, Clone)]
pub struct ManifestLocator {
    max_manifest_size: usize,
}

impl ManifestLocator {
    /// 새 탐색기를 생성합니다.
    pub fn new(max_manifest_size: usize) -> Self {
        Self { max_manifest_size }
    }

    /// 프로젝트 루트 아래의 모든 manifest를 찾습니다.
    ///
    /// 파일 시스템 manifest가 먼저 오고, 이어서 아카이브 manifest가 옵니다.
    /// 결과가 비어 있을 수 있습니다.
    pub fn locate(&self, root: &Path) -> Result<Vec<Manifest>, MavenScannerError> {
        if !root.exists() {
            return Err(MavenScannerError::RootNotFound {
                path: root.display().to_string(),
            });
        }

        let manifest_paths = find_files(root, |path| {
            path.file_name()
                .is_some_and(|name| name == MANIFEST_FILE_NAME)
        })?;
        debug!(count = manifest_paths.len(), root = %root.display(), "manifest files found");

        let archive_paths = find_files(root, |path| {
            path.extension()
                .is_some_and(|ext| ext == ARCHIVE_EXTENSION)
        })?;
        debug!(count = archive_paths.len(), root = %root.display(), "archives found");

        let mut manifests = Vec::with_capacity(manifest_paths.len());
        for path in manifest_paths {
            manifests.push(self.read_file(path)?);
        }

        for archive_path in &archive_paths {
            let embedded = archive::read_archive_manifests(archive_path, self.max_manifest_size)?;
            if !embedded.is_empty() {
                debug!(
                    archive = %archive_path.display(),
                    count = embedded.len(),
                    "manifests found in archive"
                );
            }
            manifests.extend(embedded);
        }

        Ok(manifests)
    }

    fn read_file(&self, path: PathBuf) -> Result<Manifest, MavenScannerError> {
        let io_err = |source| MavenScannerError::Io {
            path: path.display().to_string(),
            source,
        };

        let file = std::fs::File::open(&path).map_err(io_err)?;
        let size = file.metadata().map_err(io_err)?.len();
        if size > self.max_size_u64() {
            return Err(MavenScannerError::ManifestTooLarge {
                origin: path.display().to_string(),
                size,
                max: self.max_manifest_size,
            });
        }

        let mut content = String::new();
        file.take(self.max_size_u64())
            .read_to_string(&mut content)
            .map_err(io_err)?;

        Ok(Manifest {
            origin: ManifestOrigin::File { path },
            content,
        })
    }

    fn max_size_u64(&self) -> u64 {
        u64::try_from(self.max_manifest_size).unwrap_or(u64::MAX)
    }
}

/// 루트 아래에서 조건에 맞는 일반 파일을 재귀 탐색하여 경로 문자열 순으로 반환합니다.
///
/// 숨김 디렉토리도 탐색합니다. 파일을 가리키는 심볼릭 링크는 포함하고,
/// 디렉토리 심볼릭 링크는 따라가지 않습니다.
///
/// 정렬은 경로 구성요소가 아니라 전체 경로 문자열(바이트) 기준입니다.
/// `app-core/pom.xml`이 `app/pom.xml`보다 앞에 옵니다.
fn find_files(
    root: &Path,
    matches: impl Fn(&Path) -> bool,
) -> Result<Vec<PathBuf>, MavenScannerError> {
    let mut found = Vec::new();

    for entry in WalkDir::new(root) {
        let entry = entry.map_err(|e| MavenScannerError::Io {
            path: e
                .path()
                .map_or_else(|| root.display().to_string(), |p| p.display().to_string()),
            source: e.into(),
        })?;

        let is_file = entry.file_type().is_file()
            || (entry.path_is_symlink() && entry.path().is_file());
        if is_file && matches(entry.path()) {
            found.push(entry.into_path());
        }
    }

    found.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;

    const POM: &str = "<project><artifactId>app</artifactId></project>";

    fn write(root: &Path, rel: &str, content: &str) -> PathBuf {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn missing_root_is_fatal() {
        let locator = ManifestLocator::new(1024);
        let err = locator
            .locate(Path::new("/nonexistent/project/root"))
            .unwrap_err();
        assert!(matches!(err, MavenScannerError::RootNotFound { .. }));
    }

    #[test]
    fn empty_tree_yields_no_manifests() {
        let dir = tempfile::tempdir().unwrap();
        let manifests = ManifestLocator::new(1024).locate(dir.path()).unwrap();
        assert!(manifests.is_empty());
    }

    #[test]
    fn finds_pom_files_sorted_by_path() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "module-b/pom.xml", "b");
        write(dir.path(), "pom.xml", "root");
        write(dir.path(), "module-a/pom.xml", "a");

        let manifests = ManifestLocator::new(1024).locate(dir.path()).unwrap();
        let contents: Vec<_> = manifests.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["a", "b", "root"]);
    }

    #[test]
    fn sorts_by_full_path_string() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "app/pom.xml", "app");
        write(dir.path(), "app-core/pom.xml", "app-core");

        let manifests = ManifestLocator::new(1024).locate(dir.path()).unwrap();
        let contents: Vec<_> = manifests.iter().map(|m| m.content.as_str()).collect();
        // '-' (0x2d) < '/' (0x2f)
        assert_eq!(contents, vec!["app-core", "app"]);
    }

    #[cfg(unix)]
    #[test]
    fn follows_symlinked_manifest_files() {
        let dir = tempfile::tempdir().unwrap();
        let real = write(dir.path(), "shared/pom.xml.src", "linked");
        std::fs::create_dir_all(dir.path().join("module")).unwrap();
        std::os::unix::fs::symlink(&real, dir.path().join("module/pom.xml")).unwrap();

        let manifests = ManifestLocator::new(1024).locate(dir.path()).unwrap();
        assert_eq!(manifests.len(), 1);
        assert_eq!(manifests[0].content, "linked");
    }

    #[cfg(unix)]
    #[test]
    fn skips_dangling_symlinks() {
        let dir = tempfile::tempdir().unwrap();
        std::os::unix::fs::symlink(dir.path().join("missing.xml"), dir.path().join("pom.xml"))
            .unwrap();

        let manifests = ManifestLocator::new(1024).locate(dir.path()).unwrap();
        assert!(manifests.is_empty());
    }

    #[test]
    fn includes_hidden_directories() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), ".hidden/pom.xml", POM);

        let manifests = ManifestLocator::new(1024).locate(dir.path()).unwrap();
        assert_eq!(manifests.len(), 1);
    }

    #[test]
    fn ignores_similar_names_and_directories() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "pom.xml.bak", POM);
        write(dir.path(), "my-pom.xml", POM);
        std::fs::create_dir_all(dir.path().join("pom.xml")).unwrap();

        let manifests = ManifestLocator::new(1024).locate(dir.path()).unwrap();
        assert!(manifests.is_empty());
    }

    #[test]
    fn file_origin_records_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "pom.xml", POM);

        let manifests = ManifestLocator::new(1024).locate(dir.path()).unwrap();
        assert_eq!(manifests[0].origin, ManifestOrigin::File { path });
        assert_eq!(manifests[0].content, POM);
        assert!(!manifests[0].origin.is_archive());
    }

    #[test]
    fn oversized_manifest_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "pom.xml", &"x".repeat(64));

        let err = ManifestLocator::new(16).locate(dir.path()).unwrap_err();
        assert!(matches!(
            err,
            MavenScannerError::ManifestTooLarge { size: 64, max: 16, .. }
        ));
    }

    #[test]
    fn origin_display() {
        let file = ManifestOrigin::File {
            path: PathBuf::from("app/pom.xml"),
        };
        assert_eq!(file.to_string(), "app/pom.xml");

        let archive = ManifestOrigin::Archive {
            archive: PathBuf::from("lib/dep.jar"),
            entry: "META-INF/maven/g/a/pom.xml".to_owned(),
        };
        assert_eq!(archive.to_string(), "lib/dep.jar!META-INF/maven/g/a/pom.xml");
    }
}
