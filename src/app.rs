//! 批量导入编排
//!
//! 逐个文件执行：读取 → 解析校验 → 输出错误 → （可选）保存为试卷。
//! 单个文件失败不影响其他文件。

use crate::config::Config;
use crate::models::exam::Exam;
use crate::models::loaders::{list_csv_files, load_csv_document, CsvDocument};
use crate::services::{ExamStore, ImportReport, ImportService, StoreBackend};
use crate::utils::logging::{
    init_log_file, log_file_start, log_files_loaded, log_startup, log_validation_errors,
    print_final_stats,
};
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// 应用主结构
pub struct App {
    config: Config,
    import_service: ImportService,
    store: Option<StoreBackend>,
}

/// 导入统计
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImportStats {
    pub success: usize,
    pub failed: usize,
    pub total: usize,
    pub questions: usize,
    pub saved: usize,
}

impl ImportStats {
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}

/// stdout 上的 JSON 行
#[derive(Serialize)]
struct FileReport<'a> {
    file: String,
    #[serde(flatten)]
    report: &'a ImportReport,
}

/// 单个文件的处理结果
enum FileOutcome {
    Valid { questions: usize, saved: bool },
    Invalid,
}

impl App {
    /// 初始化应用
    ///
    /// `store` 为 `None` 时只校验不保存。
    pub fn initialize(config: Config, store: Option<StoreBackend>) -> Result<Self> {
        init_log_file(&config.output_log_file)
            .with_context(|| format!("无法创建日志文件: {}", config.output_log_file))?;

        log_startup(config.strict_types);

        let import_service =
            ImportService::new(config.validation_options(), config.verbose_logging);

        Ok(Self {
            config,
            import_service,
            store,
        })
    }

    /// 运行导入
    ///
    /// `files` 为空时扫描配置中的 CSV 目录。
    pub async fn run(&self, files: Vec<PathBuf>) -> Result<ImportStats> {
        let files = if files.is_empty() {
            info!("\n📁 正在扫描待导入的 CSV 文件: {}", self.config.csv_folder);
            list_csv_files(&self.config.csv_folder).await?
        } else {
            files
        };

        if files.is_empty() {
            warn!("⚠️ 没有找到待导入的 CSV 文件，程序结束");
            return Ok(ImportStats::default());
        }

        let total = files.len();
        log_files_loaded(total);

        let mut stats = ImportStats {
            total,
            ..Default::default()
        };

        for (idx, path) in files.iter().enumerate() {
            let file_index = idx + 1;
            match self.process_file(path, file_index, total).await {
                Ok(FileOutcome::Valid { questions, saved }) => {
                    stats.success += 1;
                    stats.questions += questions;
                    if saved {
                        stats.saved += 1;
                    }
                }
                Ok(FileOutcome::Invalid) => stats.failed += 1,
                Err(e) => {
                    error!("[文件 {}] ❌ 处理过程中发生错误: {:#}", file_index, e);
                    self.append_log(path, &[format!("Error: {:#}", e)])?;
                    stats.failed += 1;
                }
            }
        }

        print_final_stats(
            stats.success,
            stats.failed,
            stats.total,
            stats.questions,
            &self.config.output_log_file,
        );

        Ok(stats)
    }

    /// 处理单个文件
    async fn process_file(
        &self,
        path: &Path,
        file_index: usize,
        total: usize,
    ) -> Result<FileOutcome> {
        let doc = load_csv_document(path).await?;
        log_file_start(file_index, total, &path.display().to_string(), doc.size_kb());

        let report = self.import_service.import(&doc.content);
        self.append_log(path, &report_lines(&report))?;

        if self.config.json_report {
            let line = serde_json::to_string(&FileReport {
                file: path.display().to_string(),
                report: &report,
            })?;
            println!("{}", line);
        }

        if !report.is_valid() {
            log_validation_errors(file_index, report.errors());
            return Ok(FileOutcome::Invalid);
        }

        let questions = report.questions.len();
        let saved = match &self.store {
            Some(store) => {
                self.save_exam(store, &doc, report).await?;
                true
            }
            None => false,
        };

        Ok(FileOutcome::Valid { questions, saved })
    }

    /// 以文件名作为标题保存试卷
    async fn save_exam(
        &self,
        store: &StoreBackend,
        doc: &CsvDocument,
        report: ImportReport,
    ) -> Result<()> {
        let exam = Exam::new(doc.stem(), report.questions, self.config.exam_author.clone())
            .with_context(|| format!("无法创建试卷: {}", doc.path.display()))?;

        let receipt = store
            .save(&exam)
            .await
            .with_context(|| format!("保存试卷失败: {}", exam.title))?;

        info!(
            "✓ 试卷 \"{}\" 已保存 ({} 道题) → {}",
            exam.title, receipt.question_count, receipt.location
        );
        Ok(())
    }

    /// 把单个文件的结果追加到日志文件
    fn append_log(&self, path: &Path, lines: &[String]) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.config.output_log_file)
            .with_context(|| format!("无法写入日志文件: {}", self.config.output_log_file))?;

        writeln!(file, "[{}]", path.display())?;
        for line in lines {
            writeln!(file, "  {}", line)?;
        }
        writeln!(file)?;
        Ok(())
    }
}

/// 日志文件中的结果行
fn report_lines(report: &ImportReport) -> Vec<String> {
    let mut lines = Vec::new();
    if report.is_valid() {
        lines.push(format!("OK: {} question(s)", report.questions.len()));
    } else {
        lines.extend(report.errors().iter().cloned());
    }
    lines.extend(report.warnings().into_iter().map(|w| format!("Warning: {}", w)));
    lines
}
