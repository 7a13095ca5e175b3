//! 交互式会话命令解析

use std::path::PathBuf;

/// 会话命令
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    /// 提交一批新文件
    Add(Vec<PathBuf>),
    /// 按名称删除文件
    Remove(String),
    List,
    Results,
    /// 关闭错误提示
    Dismiss,
    Help,
    Quit,
}

pub const HELP_TEXT: &str = "\
Commands:
  add <path>...   upload one batch of image files
  remove <name>   remove a file and its result
  list            show uploaded files
  results         show processed results
  dismiss         clear the error message
  help            show this help
  quit            exit
";

impl SessionCommand {
    /// 解析一行输入；空行返回 `Ok(None)`
    pub fn parse(line: &str) -> Result<Option<Self>, String> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };

        let parsed = match command.to_lowercase().as_str() {
            "add" => {
                let paths: Vec<PathBuf> = rest.split_whitespace().map(PathBuf::from).collect();
                if paths.is_empty() {
                    return Err("usage: add <path>...".to_string());
                }
                SessionCommand::Add(paths)
            }
            // 文件名可能包含空格，取整行剩余部分
            "remove" | "rm" => {
                if rest.is_empty() {
                    return Err("usage: remove <name>".to_string());
                }
                SessionCommand::Remove(rest.to_string())
            }
            "list" | "ls" => SessionCommand::List,
            "results" => SessionCommand::Results,
            "dismiss" => SessionCommand::Dismiss,
            "help" | "?" => SessionCommand::Help,
            "quit" | "exit" | "q" => SessionCommand::Quit,
            other => return Err(format!("unknown command: {} (try `help`)", other)),
        };

        Ok(Some(parsed))
    }
}
