//! CSV 模板
//!
//! 提供给出题人参考的示例文件。

use std::path::Path;

use crate::error::{AppError, AppResult};

/// 默认模板文件名
pub const SAMPLE_FILE_NAME: &str = "exam_template.csv";

/// 示例 CSV：覆盖三种题型
pub const SAMPLE_CSV: &str = "question,type,optionA,optionB,optionC,optionD,correctAnswers
Is the sky blue?,true-false,True,False,,,A
Which of these are fruits?,multiple,Apple,Car,Orange,Train,A|C
What is the capital of India?,single,Mumbai,Delhi,Kolkata,Chennai,B
The Earth is flat,true-false,True,False,,,B
Which are programming languages?,multiple,Python,Chair,JavaScript,Table,A|C";

/// 写出模板文件
///
/// `path` 为目录时写入 `目录/exam_template.csv`，返回实际路径。
pub async fn write_sample(path: &Path) -> AppResult<std::path::PathBuf> {
    let target = if tokio::fs::metadata(path).await.is_ok_and(|m| m.is_dir()) {
        path.join(SAMPLE_FILE_NAME)
    } else {
        path.to_path_buf()
    };

    tokio::fs::write(&target, SAMPLE_CSV)
        .await
        .map_err(|e| AppError::file_write_failed(target.display().to_string(), e))?;

    tracing::info!("📥 模板已写入: {}", target.display());
    Ok(target)
}
