use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// 学生成绩报告
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudentReport {
    #[serde(default)]
    pub student_info: StudentInfo,
    #[serde(default)]
    pub subject_performance: IndexMap<String, SubjectPerformance>,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<Weakness>,
    #[serde(default)]
    pub overall_performance_summary: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudentInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub roll_number: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub grade: Option<String>,
    #[serde(default)]
    pub school: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubjectPerformance {
    #[serde(default, deserialize_with = "deserialize_text")]
    pub final_grade: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Weakness {
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub reason: String,
}

// 成绩、学号可能是字符串也可能是数字
fn deserialize_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Visitor;
    use std::fmt;

    struct TextVisitor;

    impl<'de> Visitor<'de> for TextVisitor {
        type Value = Option<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string, a number or null")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(None)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(None)
        }
    }

    deserializer.deserialize_any(TextVisitor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_accepts_numeric_and_null_fields() {
        let json = r#"{
                "student_info": {"name": "Asha", "roll_number": 17, "grade": "8", "school": "KV"},
                "subject_performance": {
                    "Math": {"final_grade": "A"},
                    "Science": {"final_grade": 91.5},
                    "Art": {"final_grade": null},
                    "Music": {}
                },
                "strengths": ["Math"],
                "weaknesses": [{"subject": "Art", "reason": "missed classes"}],
                "overall_performance_summary": "Good"
        }"#;

        let report: StudentReport = serde_json::from_str(json).unwrap();

        assert_eq!(report.student_info.roll_number.as_deref(), Some("17"));
        assert_eq!(report.subject_performance["Math"].final_grade.as_deref(), Some("A"));
        assert_eq!(report.subject_performance["Science"].final_grade.as_deref(), Some("91.5"));
        assert_eq!(report.subject_performance["Art"].final_grade, None);
        assert_eq!(report.subject_performance["Music"].final_grade, None);
        assert_eq!(report.weaknesses[0].reason, "missed classes");
    }

    #[test]
    fn test_subjects_keep_backend_order() {
        let json = r#"{"subject_performance": {"Science": {}, "English": {}, "Math": {}}}"#;
        let report: StudentReport = serde_json::from_str(json).unwrap();

        let subjects: Vec<&str> = report.subject_performance.keys().map(String::as_str).collect();
        assert_eq!(subjects, vec!["Science", "English", "Math"]);
    }
}
