//! 选择题页面的交互命令解析

/// 交互命令；章节/子主题编号从 1 开始
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum McqCommand {
    List,
    /// 切换章节"全选"
    ToggleChapter { chapter: usize },
    /// 切换单个子主题
    ToggleSubtopic { chapter: usize, subtopic: usize },
    Extract,
    Generate,
    Help,
    Quit,
}

pub const MCQ_HELP: &str = "\
命令:
  list                 显示主题和勾选状态
  all <章>             切换章节全选，例如: all 1
  toggle <章>.<子>     切换子主题，例如: toggle 1.2 或 toggle 1 2
  extract              重新提取主题
  generate             按已选子主题生成选择题
  quit                 退出";

impl McqCommand {
    pub fn parse(line: &str) -> Result<Self, String> {
        let mut parts = line.split_whitespace();
        let Some(head) = parts.next() else {
            return Err("请输入命令，输入 help 查看帮助".to_string());
        };
        let args: Vec<&str> = parts.collect();

        match (head.to_ascii_lowercase().as_str(), args.as_slice()) {
            ("list" | "ls", []) => Ok(McqCommand::List),
            ("all", [chapter]) => Ok(McqCommand::ToggleChapter {
                chapter: parse_index(chapter)?,
            }),
            ("toggle" | "t", [pair]) => {
                let (chapter, subtopic) = pair
                    .split_once('.')
                    .ok_or_else(|| format!("无法解析编号: {}", pair))?;
                Ok(McqCommand::ToggleSubtopic {
                    chapter: parse_index(chapter)?,
                    subtopic: parse_index(subtopic)?,
                })
            }
            ("toggle" | "t", [chapter, subtopic]) => Ok(McqCommand::ToggleSubtopic {
                chapter: parse_index(chapter)?,
                subtopic: parse_index(subtopic)?,
            }),
            ("extract", []) => Ok(McqCommand::Extract),
            ("generate" | "gen", []) => Ok(McqCommand::Generate),
            ("help" | "?", []) => Ok(McqCommand::Help),
            ("quit" | "exit" | "q", []) => Ok(McqCommand::Quit),
            _ => Err(format!("未知命令: {}，输入 help 查看帮助", line.trim())),
        }
    }
}

fn parse_index(raw: &str) -> Result<usize, String> {
    match raw.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(format!("编号必须是正整数: {}", raw)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_toggle_forms() {
        assert_eq!(
            McqCommand::parse("toggle 1.2"),
            Ok(McqCommand::ToggleSubtopic { chapter: 1, subtopic: 2 })
        );
        assert_eq!(
            McqCommand::parse("t 3 1"),
            Ok(McqCommand::ToggleSubtopic { chapter: 3, subtopic: 1 })
        );
        assert_eq!(
            McqCommand::parse("  ALL 2 "),
            Ok(McqCommand::ToggleChapter { chapter: 2 })
        );
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(McqCommand::parse("").is_err());
        assert!(McqCommand::parse("all 0").is_err());
        assert!(McqCommand::parse("toggle 1").is_err());
        assert!(McqCommand::parse("generate now").is_err());
        assert_eq!(McqCommand::parse("quit"), Ok(McqCommand::Quit));
    }
}
