//! 対話式のページ移動とアンケート選択

use crate::error::Result;
use crate::render::render_table;
use dialoguer::Input;
use survey_insight_common::{HeaderStyle, Paginator, Record, SurveySelection};

/// ページ操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageCommand {
    Next,
    Prev,
    First,
    /// 1始まりのページ番号
    GoTo(usize),
    Quit,
}

/// 入力をページ操作に変換（不正な入力は `None`）
pub fn parse_page_command(input: &str) -> Option<PageCommand> {
    match input.trim() {
        "" | "n" | "next" => Some(PageCommand::Next),
        "p" | "prev" => Some(PageCommand::Prev),
        "f" | "first" => Some(PageCommand::First),
        "q" | "quit" => Some(PageCommand::Quit),
        other => other
            .parse::<usize>()
            .ok()
            .filter(|n| *n > 0)
            .map(PageCommand::GoTo),
    }
}

/// 操作を適用し、続行するかを返す
pub fn apply_page_command(paginator: &mut Paginator, command: PageCommand, len: usize) -> bool {
    match command {
        PageCommand::Next => paginator.next(len),
        PageCommand::Prev => paginator.prev(),
        PageCommand::First => paginator.first(),
        PageCommand::GoTo(page) => paginator.go_to(page - 1, len),
        PageCommand::Quit => return false,
    }
    true
}

/// 表をページ単位で対話的に閲覧
pub fn browse_table(records: &[Record], style: HeaderStyle, paginator: &mut Paginator) -> Result<()> {
    loop {
        println!("{}\n", render_table(records, style, paginator));
        if records.is_empty() {
            return Ok(());
        }

        let input: String = Input::new()
            .with_prompt("[Enter/n]次 [p]前 [f]先頭 [番号]移動 [q]終了")
            .allow_empty(true)
            .interact_text()?;

        match parse_page_command(&input) {
            Some(command) => {
                if !apply_page_command(paginator, command, records.len()) {
                    return Ok(());
                }
            }
            None => println!("⚠ 不明な操作: {}", input.trim()),
        }
    }
}

/// SurveyIDを入力して確定する（一覧にないIDも受け付ける）
pub fn prompt_survey(ids: &[String], selection: &mut SurveySelection) -> Result<()> {
    println!("SurveyID: {}", ids.join(", "));

    let input: String = Input::new()
        .with_prompt("SurveyID")
        .default(selection.input().to_string())
        .interact_text()?;

    selection.set_input(input.trim());
    selection.submit();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_page_command() {
        assert_eq!(parse_page_command(""), Some(PageCommand::Next));
        assert_eq!(parse_page_command(" p "), Some(PageCommand::Prev));
        assert_eq!(parse_page_command("first"), Some(PageCommand::First));
        assert_eq!(parse_page_command("3"), Some(PageCommand::GoTo(3)));
        assert_eq!(parse_page_command("q"), Some(PageCommand::Quit));
        assert_eq!(parse_page_command("0"), None);
        assert_eq!(parse_page_command("x"), None);
    }

    #[test]
    fn test_apply_page_command() {
        let mut paginator = Paginator::new(10);
        let len = 25;

        assert!(apply_page_command(&mut paginator, PageCommand::Next, len));
        assert_eq!(paginator.page_index(), 1);
        assert!(apply_page_command(&mut paginator, PageCommand::GoTo(3), len));
        assert_eq!(paginator.page_index(), 2);
        assert!(apply_page_command(&mut paginator, PageCommand::Next, len));
        assert_eq!(paginator.page_index(), 2);
        assert!(apply_page_command(&mut paginator, PageCommand::First, len));
        assert_eq!(paginator.page_index(), 0);
        assert!(!apply_page_command(&mut paginator, PageCommand::Quit, len));
    }
}
