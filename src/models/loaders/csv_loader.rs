use crate::error::{AppError, AppResult, FileError};
use std::path::{Path, PathBuf};
use tokio::fs;

/// 从磁盘读取的 CSV 文档
#[derive(Debug, Clone)]
pub struct CsvDocument {
    pub path: PathBuf,
    pub content: String,
}

impl CsvDocument {
    /// 文件名（不含扩展名），用作默认试卷标题
    pub fn stem(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default()
    }

    pub fn size_kb(&self) -> f64 {
        self.content.len() as f64 / 1024.0
    }
}

/// 读取单个 CSV 文件
pub async fn load_csv_document(path: &Path) -> AppResult<CsvDocument> {
    if !fs::try_exists(path).await.unwrap_or(false) {
        return Err(FileError::NotFound {
            path: path.display().to_string(),
        }
        .into());
    }

    let content = fs::read_to_string(path)
        .await
        .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;

    Ok(CsvDocument {
        path: path.to_path_buf(),
        content,
    })
}

/// 列出文件夹中所有 `.csv` 文件，按文件名排序
pub async fn list_csv_files(folder_path: &str) -> AppResult<Vec<PathBuf>> {
    let folder = PathBuf::from(folder_path);

    if !fs::try_exists(&folder).await.unwrap_or(false) {
        return Err(FileError::DirectoryNotFound {
            path: folder_path.to_string(),
        }
        .into());
    }

    let mut entries = fs::read_dir(&folder)
        .await
        .map_err(|e| AppError::file_read_failed(folder_path, e))?;

    let mut csv_files = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| AppError::file_read_failed(folder_path, e))?
    {
        let path = entry.path();
        let is_csv = path
            .extension()
            .and_then(|s| s.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if is_csv {
            csv_files.push(path);
        }
    }

    if csv_files.is_empty() {
        tracing::warn!("在文件夹 {} 中没有找到 CSV 文件", folder_path);
    }

    csv_files.sort();
    Ok(csv_files)
}
