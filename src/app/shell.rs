// ==========================================
// 备件查询工具 - 交互式命令行
// ==========================================
// 职责: 逐行解析命令并调用 StockSession
// 约定: 操作类错误仅输出提示,不终止会话
// ==========================================

use crate::app::error::{ErrorResponse, SessionError};
use crate::app::master_store::MasterStore;
use crate::app::render::{format_amount, render_lines, render_records, render_totals};
use crate::app::session::{AddOutcome, StockSession};
use crate::domain::request::RequestLine;
use crate::domain::stock::StockRecord;
use crate::domain::types::ViewMode;
use crate::i18n::{t, t_with_args};
use std::path::Path;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

/// 单条命令的执行结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellReply {
    Output(String),
    Quit(String),
}

pub struct Shell<S: MasterStore> {
    session: StockSession<S>,
}

impl<S: MasterStore> Shell<S> {
    pub fn new(session: StockSession<S>) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &StockSession<S> {
        &self.session
    }

    /// 启动时加载主库存文件并给出提示
    pub async fn startup(&mut self) -> String {
        let title = t_with_args(
            "shell.welcome",
            &[
                ("title", &self.session.config().page_title),
                ("version", crate::VERSION),
            ],
        );

        let status = match self.session.load_master().await {
            Ok(true) => self.loaded_message(),
            Ok(false) => t_with_args(
                "master.not_found",
                &[("path", &self.session.store().master_path().display().to_string())],
            ),
            Err(e) => error_message(&e),
        };
        format!("{}\n{}", title, status)
    }

    /// 读取输入直到 quit 或输入结束
    pub async fn run<R, W>(&mut self, reader: R, mut writer: W) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();
        writer.write_all(b"> ").await?;
        writer.flush().await?;

        while let Some(line) = lines.next_line().await? {
            match self.execute(&line).await {
                ShellReply::Output(text) => {
                    if !text.is_empty() {
                        writer.write_all(text.as_bytes()).await?;
                        writer.write_all(b"\n").await?;
                    }
                }
                ShellReply::Quit(text) => {
                    writer.write_all(text.as_bytes()).await?;
                    writer.write_all(b"\n").await?;
                    writer.flush().await?;
                    return Ok(());
                }
            }
            writer.write_all(b"> ").await?;
            writer.flush().await?;
        }
        writer.write_all(b"\n").await?;
        writer.flush().await
    }

    /// 执行单条命令
    pub async fn execute(&mut self, line: &str) -> ShellReply {
        let line = line.trim();
        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };
        debug!(command = %command, "执行命令");

        let result = match command.to_lowercase().as_str() {
            "" => Ok(String::new()),
            "quit" | "exit" | "q" => return ShellReply::Quit(t("shell.bye")),
            "help" | "?" => Ok(t("shell.help").trim_end().to_string()),
            "search" | "s" => self.cmd_search(rest),
            "suggest" => self.cmd_suggest(rest),
            "add" | "a" => self.cmd_add(rest),
            "pick" => self.cmd_pick(rest),
            "qty" => self.cmd_qty(rest),
            "rm" | "remove" => self.cmd_remove(rest),
            "list" | "ls" => Ok(render_lines(self.session.lines(), self.session.view_mode())),
            "totals" => Ok(render_totals(&self.session.totals())),
            "clear" => {
                self.session.clear_list();
                Ok(t("cart.cleared"))
            }
            "view" => self.cmd_view(rest),
            "export" => self.cmd_export(rest),
            "replace" => self.cmd_replace(rest).await,
            "info" => Ok(self.info_message()),
            other => Ok(t_with_args("shell.unknown_command", &[("command", other)])),
        };

        match result {
            Ok(text) => ShellReply::Output(text),
            Err(e) => ShellReply::Output(error_message(&e)),
        }
    }

    // ==========================================
    // 命令实现
    // ==========================================

    fn cmd_search(&self, query: &str) -> Result<String, SessionError> {
        if query.is_empty() {
            return Ok(t("search.prompt"));
        }

        let view = self.session.search(query)?;
        if view.matches.is_empty() {
            return Ok(t("search.no_results"));
        }

        let mut out = vec![
            t_with_args("search.results", &[("count", &view.matches.len().to_string())]),
            render_records(&view.matches, self.session.view_mode()),
        ];
        if let Some(qty) = view.available_quantity {
            out.push(t_with_args("search.available", &[("qty", &qty.to_string())]));
        }
        Ok(out.join("\n"))
    }

    fn cmd_suggest(&self, query: &str) -> Result<String, SessionError> {
        let suggestions = self.session.suggest(query)?;
        if suggestions.is_empty() {
            return Ok(t("search.no_suggestions"));
        }
        Ok(suggestions.join("\n"))
    }

    fn cmd_add(&mut self, query: &str) -> Result<String, SessionError> {
        match self.session.add_to_list(query)? {
            AddOutcome::Added { line } => Ok(added_message(&line)),
            AddOutcome::NoMatch { query } => Ok(t_with_args("add.not_found", &[("query", &query)])),
            AddOutcome::Ambiguous { candidates } => Ok(self.candidates_message(&candidates)),
        }
    }

    /// 候选列表（带 0 起序号）
    fn candidates_message(&self, candidates: &[StockRecord]) -> String {
        let header = t_with_args(
            "add.ambiguous",
            &[
                ("count", &candidates.len().to_string()),
                ("max", &candidates.len().saturating_sub(1).to_string()),
            ],
        );
        format!(
            "{}\n{}",
            header,
            render_records(candidates, self.session.view_mode())
        )
    }

    fn cmd_pick(&mut self, args: &str) -> Result<String, SessionError> {
        if args.is_empty() {
            let candidates: Vec<StockRecord> = self
                .session
                .pending_candidates()
                .ok_or(SessionError::NoPendingSelection)?
                .into_iter()
                .cloned()
                .collect();
            return Ok(self.candidates_message(&candidates));
        }
        let Ok(index) = args.parse::<usize>() else {
            return Ok(usage("pick [n]"));
        };
        let line = self.session.confirm_selection(index)?;
        Ok(added_message(&line))
    }

    fn cmd_qty(&mut self, args: &str) -> Result<String, SessionError> {
        let (line_arg, value) = match args.split_once(char::is_whitespace) {
            Some((line_arg, value)) => (line_arg, value.trim()),
            None => (args, ""),
        };
        let Ok(line_index) = line_arg.parse::<usize>() else {
            return Ok(usage("qty <line> <value>"));
        };

        let line = self.session.set_quantity_from_input(line_index, value)?;
        Ok(t_with_args(
            "cart.updated",
            &[
                ("line", &line_index.to_string()),
                ("qty", &line.qty.to_string()),
                ("total", &format_amount(line.line_total())),
            ],
        ))
    }

    fn cmd_remove(&mut self, args: &str) -> Result<String, SessionError> {
        let Ok(line_index) = args.parse::<usize>() else {
            return Ok(usage("rm <line>"));
        };
        let line = self.session.remove_line(line_index)?;
        Ok(t_with_args(
            "cart.removed",
            &[("line", &line_index.to_string()), ("model", &line.model)],
        ))
    }

    fn cmd_view(&mut self, args: &str) -> Result<String, SessionError> {
        if !args.is_empty() {
            match args.parse::<ViewMode>() {
                Ok(mode) => self.session.set_view_mode(mode),
                Err(_) => return Ok(usage("view [compact|table]")),
            }
        }
        Ok(t_with_args(
            "view.current",
            &[("mode", &self.session.view_mode().to_string())],
        ))
    }

    fn cmd_export(&self, args: &str) -> Result<String, SessionError> {
        let path = if args.is_empty() {
            self.session.config().export_file_name.as_str()
        } else {
            args
        };
        self.session.export_to_path(path)?;
        Ok(t_with_args(
            "export.done",
            &[
                ("lines", &self.session.lines().len().to_string()),
                ("path", path),
            ],
        ))
    }

    async fn cmd_replace(&mut self, args: &str) -> Result<String, SessionError> {
        let Some((password, file)) = args.split_once(char::is_whitespace) else {
            return Ok(usage("replace <password> <file>"));
        };
        let file = Path::new(file.trim());
        let file_name = file
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();

        let bytes = tokio::fs::read(file)
            .await
            .map_err(crate::importer::ImportError::from)?;
        let info = self.session.replace_master(password, &file_name, &bytes).await?;
        Ok(t_with_args(
            "master.replaced",
            &[("rows", &info.total_rows.to_string())],
        ))
    }

    fn loaded_message(&self) -> String {
        match self.session.master_info() {
            Some(info) => t_with_args(
                "master.loaded",
                &[
                    ("rows", &info.total_rows.to_string()),
                    ("file", &info.file_name),
                ],
            ),
            None => t("master.not_loaded"),
        }
    }

    fn info_message(&self) -> String {
        match self.session.master_info() {
            Some(info) => t_with_args(
                "master.info",
                &[
                    ("file", &info.file_name),
                    ("rows", &info.total_rows.to_string()),
                    ("loaded_at", &info.loaded_at.format("%Y-%m-%d %H:%M:%S UTC").to_string()),
                ],
            ),
            None => t("master.not_loaded"),
        }
    }
}

fn added_message(line: &RequestLine) -> String {
    t_with_args(
        "add.added",
        &[
            ("model", &line.model),
            ("description", &line.material_description),
        ],
    )
}

fn usage(text: &str) -> String {
    t_with_args("shell.usage", &[("usage", text)])
}

fn error_message(err: &SessionError) -> String {
    let response = ErrorResponse::from(err);
    t_with_args(
        "shell.error",
        &[("code", &response.code), ("message", &response.message)],
    )
}
