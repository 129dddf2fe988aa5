//! `.jar` 아카이브 내부 manifest 추출
//!
//! 아카이브는 zip 형식으로 프로세스 내에서 읽습니다.
//! 경로에 `pom.xml`이 포함된 항목을 아카이브에 기록된 순서대로 반환합니다.

use std::io::Read;
use std::path::Path;

use super::{MANIFEST_FILE_NAME, Manifest, ManifestOrigin};
use crate::error::MavenScannerError;

/// 아카이브에서 manifest 항목을 모두 읽습니다 (동기 I/O).
///
/// # Errors
///
/// - 파일을 열 수 없거나 zip 형식이 아니면 `ArchiveOpen`
/// - 항목을 읽을 수 없으면 `ArchiveEntry`
/// - 항목이 `max_size`보다 크면 `ManifestTooLarge`
pub fn read_archive_manifests(
    archive_path: &Path,
    max_size: usize,
) -> Result<Vec<Manifest>, MavenScannerError> {
    let archive_name = archive_path.display().to_string();
    let open_err = |reason: String| MavenScannerError::ArchiveOpen {
        path: archive_name.clone(),
        reason,
    };

    let file = std::fs::File::open(archive_path).map_err(|e| open_err(e.to_string()))?;
    let mut archive = zip::ZipArchive::new(file).map_err(|e| open_err(e.to_string()))?;

    let max_size_u64 = u64::try_from(max_size).unwrap_or(u64::MAX);
    let mut manifests = Vec::new();

    for index in 0..archive.len() {
        let mut entry = archive
            .by_index(index)
            .map_err(|e| MavenScannerError::ArchiveEntry {
                archive: archive_name.clone(),
                entry: format!("#{index}"),
                reason: e.to_string(),
            })?;

        if entry.is_dir() || !entry.name().contains(MANIFEST_FILE_NAME) {
            continue;
        }

        let entry_name = entry.name().to_owned();
        if entry.size() > max_size_u64 {
            return Err(MavenScannerError::ManifestTooLarge {
                origin: format!("{archive_name}!{entry_name}"),
                size: entry.size(),
                max: max_size,
            });
        }

        let mut content = String::new();
        (&mut entry)
            .take(max_size_u64)
            .read_to_string(&mut content)
            .map_err(|e| MavenScannerError::ArchiveEntry {
                archive: archive_name.clone(),
                entry: entry_name.clone(),
                reason: e.to_string(),
            })?;

        manifests.push(Manifest {
            origin: ManifestOrigin::Archive {
                archive: archive_path.to_path_buf(),
                entry: entry_name,
            },
            content,
        });
    }

    Ok(manifests)
}
