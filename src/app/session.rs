// ==========================================
// 备件查询工具 - 会话上下文
// ==========================================
// 职责: 持有当前库存表、申领清单、待选候选集与展示模式
// 红线: 所有操作都显式经由会话对象,不使用全局状态
// 红线: 加载失败保留原库存表与清单
// ==========================================

use crate::app::admin::AdminGate;
use crate::app::error::{SessionError, SessionResult};
use crate::app::master_store::MasterStore;
use crate::config::AppConfig;
use crate::domain::request::{RequestLine, RequestTotals};
use crate::domain::stock::{MasterInfo, StockRecord, StockTable};
use crate::domain::types::ViewMode;
use crate::engine::request_cart::RequestCart;
use crate::engine::search::{AddResolution, SearchEngine};
use crate::export::{ExportFormat, RequestExporter};
use crate::importer::error::ImportError;
use crate::importer::file_parser::FileFormat;
use crate::importer::stock_importer::StockImporter;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, warn};
use uuid::Uuid;

// ==========================================
// 操作结果类型
// ==========================================

/// 实时过滤结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchView {
    pub query: String,
    pub matches: Vec<StockRecord>,
    /// 仅当恰好一条命中时给出
    pub available_quantity: Option<i64>,
}

/// 加入清单结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AddOutcome {
    Added { line: RequestLine },
    NoMatch { query: String },
    /// 多条命中: 清单不变,候选集已暂存等待 confirm_selection
    Ambiguous { candidates: Vec<StockRecord> },
}

/// 待选择的候选集（库存表下标）
#[derive(Debug, Clone)]
struct PendingSelection {
    query: String,
    candidates: Vec<usize>,
}

// ==========================================
// StockSession
// ==========================================
pub struct StockSession<S: MasterStore> {
    session_id: String,
    config: AppConfig,
    store: S,
    importer: StockImporter,
    search: SearchEngine,
    exporter: RequestExporter,
    admin: AdminGate,
    table: Option<StockTable>,
    cart: RequestCart,
    pending: Option<PendingSelection>,
    view_mode: ViewMode,
}

impl<S: MasterStore> StockSession<S> {
    pub fn new(config: AppConfig, store: S) -> Self {
        let session_id = Uuid::new_v4().to_string();
        debug!(session_id = %session_id, "创建会话");

        Self {
            session_id,
            admin: AdminGate::new(config.admin_password.clone()),
            view_mode: config.default_view,
            config,
            store,
            importer: StockImporter::new(),
            search: SearchEngine,
            exporter: RequestExporter,
            table: None,
            cart: RequestCart::new(),
            pending: None,
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    // ==========================================
    // 主库存文件
    // ==========================================

    /// 从固定位置加载主库存文件
    ///
    /// # 返回
    /// - Ok(true): 已加载（清单清空）
    /// - Ok(false): 文件不存在,会话保持未加载状态
    /// - Err: 存在性检查/解析/表头错误,原库存表与清单保持不变
    pub async fn load_master(&mut self) -> SessionResult<bool> {
        if !self.store.exists().await? {
            warn!(
                session_id = %self.session_id,
                file = %self.store.master_path().display(),
                "主库存文件不存在"
            );
            return Ok(false);
        }

        let table = self.read_master().await?;
        self.install_table(table);
        Ok(true)
    }

    /// 管理员上传新文件覆盖主库存文件并重新加载
    ///
    /// 顺序: 口令校验 → 格式校验 → 内存预解析 → 原子覆盖 → 重新加载
    pub async fn replace_master(
        &mut self,
        password: &str,
        file_name: &str,
        bytes: &[u8],
    ) -> SessionResult<MasterInfo> {
        self.admin.authorize(password)?;

        let upload_format = FileFormat::from_path(file_name)?;
        let master_format = FileFormat::from_path(self.store.master_path())?;
        if upload_format != master_format {
            return Err(ImportError::FormatMismatch {
                expected: master_format.extension().to_string(),
                actual: upload_format.extension().to_string(),
            }
            .into());
        }

        // 结构错误的文件不落盘
        self.importer.import_bytes(file_name, bytes)?;

        self.store.replace(bytes).await?;

        match self.read_master().await {
            Ok(table) => {
                let info = table.info().clone();
                self.install_table(table);
                info!(
                    session_id = %self.session_id,
                    load_id = %info.load_id,
                    upload = %file_name,
                    "主库存文件已替换"
                );
                Ok(info)
            }
            Err(e) => {
                warn!(session_id = %self.session_id, error = %e, "覆盖后重新加载失败,丢弃内存库存表");
                self.table = None;
                self.cart.clear();
                self.pending = None;
                Err(SessionError::ReloadAfterReplace(e))
            }
        }
    }

    async fn read_master(&self) -> Result<StockTable, ImportError> {
        let bytes = self.store.read().await?;
        self.importer.import_bytes(&self.store.file_name(), &bytes)
    }

    fn install_table(&mut self, table: StockTable) {
        info!(
            session_id = %self.session_id,
            load_id = %table.info().load_id,
            rows = table.len(),
            cleared_lines = self.cart.len(),
            "库存表已就绪"
        );
        self.table = Some(table);
        self.cart.clear();
        self.pending = None;
    }

    pub fn is_loaded(&self) -> bool {
        self.table.is_some()
    }

    pub fn master_info(&self) -> Option<&MasterInfo> {
        self.table.as_ref().map(StockTable::info)
    }

    pub fn table(&self) -> Option<&StockTable> {
        self.table.as_ref()
    }

    fn loaded_table(&self) -> SessionResult<&StockTable> {
        self.table.as_ref().ok_or(SessionError::NoMasterLoaded)
    }

    // ==========================================
    // 查询
    // ==========================================

    pub fn search(&self, query: &str) -> SessionResult<SearchView> {
        let table = self.loaded_table()?;
        let hits = self.search.filter(query, table.records());
        let available_quantity = self.search.available_quantity(&hits, table.records());

        Ok(SearchView {
            query: query.trim().to_string(),
            matches: hits
                .iter()
                .filter_map(|&idx| table.get(idx).cloned())
                .collect(),
            available_quantity,
        })
    }

    pub fn suggest(&self, query: &str) -> SessionResult<Vec<String>> {
        let table = self.loaded_table()?;
        Ok(self
            .search
            .suggestions(query, table.records(), self.config.suggestion_limit))
    }

    // ==========================================
    // 申领清单
    // ==========================================

    pub fn add_to_list(&mut self, query: &str) -> SessionResult<AddOutcome> {
        self.pending = None;
        if query.trim().is_empty() {
            return Err(SessionError::EmptyQuery);
        }

        let table = self.table.as_ref().ok_or(SessionError::NoMasterLoaded)?;
        match self.search.resolve_for_add(query, table.records()) {
            AddResolution::NotFound { query } => {
                info!(session_id = %self.session_id, query = %query, "未找到匹配记录");
                Ok(AddOutcome::NoMatch { query })
            }
            AddResolution::Unique(idx) => {
                let record = table.get(idx).ok_or(SessionError::NoMasterLoaded)?;
                let line = self.cart.add(record).clone();
                Ok(AddOutcome::Added { line })
            }
            AddResolution::Ambiguous(candidates) => {
                let records: Vec<StockRecord> = candidates
                    .iter()
                    .filter_map(|&idx| table.get(idx).cloned())
                    .collect();
                info!(
                    session_id = %self.session_id,
                    query = %query.trim(),
                    candidates = records.len(),
                    "多条匹配,等待选择"
                );
                self.pending = Some(PendingSelection {
                    query: query.trim().to_string(),
                    candidates,
                });
                Ok(AddOutcome::Ambiguous {
                    candidates: records,
                })
            }
        }
    }

    /// 在待选候选集中选择一条加入清单（序号 0 起）
    ///
    /// 序号越界时拒绝,候选集保留以便重新选择
    pub fn confirm_selection(&mut self, index: usize) -> SessionResult<RequestLine> {
        let pending = self.pending.as_ref().ok_or(SessionError::NoPendingSelection)?;
        let table = self.table.as_ref().ok_or(SessionError::NoMasterLoaded)?;

        let record_idx = self.search.select_candidate(&pending.candidates, index)?;
        let record = table.get(record_idx).ok_or(SessionError::NoMasterLoaded)?;
        debug!(query = %pending.query, index, "确认候选记录");

        let line = self.cart.add(record).clone();
        self.pending = None;
        Ok(line)
    }

    /// 当前待选候选记录
    pub fn pending_candidates(&self) -> Option<Vec<&StockRecord>> {
        let pending = self.pending.as_ref()?;
        let table = self.table.as_ref()?;
        Some(
            pending
                .candidates
                .iter()
                .filter_map(|&idx| table.get(idx))
                .collect(),
        )
    }

    pub fn set_quantity(&mut self, line_index: usize, qty: i64) -> SessionResult<RequestLine> {
        Ok(self.cart.set_quantity(line_index, qty)?.clone())
    }

    pub fn set_quantity_from_input(
        &mut self,
        line_index: usize,
        input: &str,
    ) -> SessionResult<RequestLine> {
        Ok(self.cart.set_quantity_from_input(line_index, input)?.clone())
    }

    pub fn remove_line(&mut self, line_index: usize) -> SessionResult<RequestLine> {
        Ok(self.cart.remove(line_index)?)
    }

    pub fn clear_list(&mut self) {
        info!(session_id = %self.session_id, lines = self.cart.len(), "清空申领清单");
        self.cart.clear();
    }

    pub fn totals(&self) -> RequestTotals {
        self.cart.totals()
    }

    pub fn lines(&self) -> &[RequestLine] {
        self.cart.lines()
    }

    // ==========================================
    // 导出
    // ==========================================

    pub fn export(&self, format: ExportFormat) -> SessionResult<Vec<u8>> {
        Ok(self.exporter.to_bytes(self.cart.lines(), format)?)
    }

    pub fn export_to_path<P: AsRef<Path>>(&self, path: P) -> SessionResult<()> {
        Ok(self.exporter.write_to_path(self.cart.lines(), path)?)
    }

    // ==========================================
    // 展示模式
    // ==========================================

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        debug!(session_id = %self.session_id, mode = %mode, "切换展示模式");
        self.view_mode = mode;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::master_store::FsMasterStore;
    use tempfile::TempDir;

    const MASTER_CSV: &str = "Model,Description,SHRM,Home,Stock,Used Spares,Price\n\
M100,Blade,3,2,5,1,12.5\n\
M101,Guard,0,1,4,0,7.0\n";

    async fn loaded_session(dir: &TempDir) -> StockSession<FsMasterStore> {
        let path = dir.path().join("stocks1.csv");
        std::fs::write(&path, MASTER_CSV).unwrap();

        let config = AppConfig {
            master_file: path.clone(),
            ..AppConfig::default()
        };
        let mut session = StockSession::new(config, FsMasterStore::new(path));
        assert!(session.load_master().await.unwrap());
        session
    }

    #[tokio::test]
    async fn test_missing_master_is_not_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("stocks1.xlsx");
        let mut session = StockSession::new(AppConfig::default(), FsMasterStore::new(path));

        assert!(!session.load_master().await.unwrap());
        assert!(!session.is_loaded());
        assert!(matches!(session.search("m1"), Err(SessionError::NoMasterLoaded)));
    }

    #[tokio::test]
    async fn test_search_and_available_quantity() {
        let dir = TempDir::new().unwrap();
        let session = loaded_session(&dir).await;

        let view = session.search("m1").unwrap();
        assert_eq!(view.matches.len(), 2);
        assert_eq!(view.available_quantity, None);

        let view = session.search("guard").unwrap();
        assert_eq!(view.matches.len(), 1);
        assert_eq!(view.available_quantity, Some(4));

        assert!(session.search("  ").unwrap().matches.is_empty());
    }

    #[tokio::test]
    async fn test_ambiguous_add_then_confirm() {
        let dir = TempDir::new().unwrap();
        let mut session = loaded_session(&dir).await;

        let outcome = session.add_to_list("m10").unwrap();
        let AddOutcome::Ambiguous { candidates } = outcome else {
            panic!("expected ambiguous outcome");
        };
        assert_eq!(candidates.len(), 2);
        assert!(session.lines().is_empty());

        assert!(matches!(
            session.confirm_selection(2),
            Err(SessionError::Search(_))
        ));
        assert!(session.pending_candidates().is_some());

        let line = session.confirm_selection(1).unwrap();
        assert_eq!(line.model, "M101");
        assert_eq!(session.lines().len(), 1);
        assert!(matches!(
            session.confirm_selection(0),
            Err(SessionError::NoPendingSelection)
        ));
    }

    #[tokio::test]
    async fn test_new_add_discards_pending_selection() {
        let dir = TempDir::new().unwrap();
        let mut session = loaded_session(&dir).await;

        session.add_to_list("m10").unwrap();
        assert_eq!(
            session.add_to_list("zzz").unwrap(),
            AddOutcome::NoMatch {
                query: "zzz".to_string()
            }
        );
        assert!(session.pending_candidates().is_none());
        assert!(matches!(session.add_to_list(" "), Err(SessionError::EmptyQuery)));
    }

    #[tokio::test]
    async fn test_replace_requires_password_and_matching_format() {
        let dir = TempDir::new().unwrap();
        let mut session = loaded_session(&dir).await;
        session.add_to_list("M100 - Blade").unwrap();

        let upload = b"Model,Description\nX1,Drill\n";
        assert!(matches!(
            session.replace_master("wrong", "new.csv", upload).await,
            Err(SessionError::AccessDenied)
        ));
        assert!(matches!(
            session.replace_master("makita123", "new.xlsx", upload).await,
            Err(SessionError::Import(ImportError::FormatMismatch { .. }))
        ));
        assert_eq!(session.lines().len(), 1);

        let info = session
            .replace_master("makita123", "new.csv", upload)
            .await
            .unwrap();
        assert_eq!(info.total_rows, 1);
        assert!(session.lines().is_empty());
        assert_eq!(session.search("drill").unwrap().matches.len(), 1);
    }

    #[tokio::test]
    async fn test_replace_with_bad_schema_keeps_state() {
        let dir = TempDir::new().unwrap();
        let mut session = loaded_session(&dir).await;
        session.add_to_list("M100 - Blade").unwrap();

        let err = session
            .replace_master("makita123", "new.csv", b"Foo,Bar\n1,2\n")
            .await
            .unwrap_err();
        assert_eq!(err.code(), "SCHEMA_ERROR");

        assert_eq!(session.lines().len(), 1);
        assert_eq!(session.master_info().unwrap().total_rows, 2);
        let on_disk = std::fs::read_to_string(dir.path().join("stocks1.csv")).unwrap();
        assert_eq!(on_disk, MASTER_CSV);
    }

    #[tokio::test]
    async fn test_view_mode_does_not_touch_cart() {
        let dir = TempDir::new().unwrap();
        let mut session = loaded_session(&dir).await;
        session.add_to_list("M100 - Blade").unwrap();

        session.set_view_mode(ViewMode::Table);
        session.set_quantity_from_input(0, "3").unwrap();
        session.set_view_mode(ViewMode::Compact);
        session.set_quantity(0, 3).unwrap();

        assert_eq!(session.view_mode(), ViewMode::Compact);
        assert_eq!(session.totals().total_qty, 3);
    }
}
