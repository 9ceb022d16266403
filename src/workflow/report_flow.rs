//! 成绩单报告流程

use tracing::{info, warn};

use crate::clients::Backend;
use crate::error::{FlowError, FlowResult};
use crate::models::{Document, StudentReport};

pub struct ReportFlow<'a, B> {
    backend: &'a B,
}

impl<'a, B: Backend> ReportFlow<'a, B> {
    pub fn new(backend: &'a B) -> Self {
        Self { backend }
    }

    /// 上传成绩单 PDF 并生成报告
    pub async fn upload(&self, document: &Document) -> FlowResult<StudentReport> {
        info!("正在生成报告: {}", document.name);

        let report = self.backend.upload_report(document).await.map_err(|e| {
            warn!("生成报告失败: {}", e);
            FlowError::remote(e, "❌ 生成报告失败")
        })?;

        report.ok_or_else(|| FlowError::NothingGenerated("⚠ 后端没有返回报告数据".to_string()))
    }

    /// 按学号查询报告
    pub async fn fetch(&self, student_id: &str) -> FlowResult<StudentReport> {
        let student_id = student_id.trim();
        if student_id.is_empty() {
            return Err(FlowError::EmptyStudentId);
        }

        info!("正在查询学号 {} 的报告", student_id);

        let report = self.backend.fetch_report(student_id).await.map_err(|e| {
            warn!("查询报告失败: {}", e);
            FlowError::remote(e, "❌ 查询报告失败")
        })?;

        report.ok_or_else(|| FlowError::NothingGenerated(format!("⚠ 未找到学号 {} 的报告", student_id)))
    }
}
