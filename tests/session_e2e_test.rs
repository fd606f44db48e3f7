// ==========================================
// StockSession 端到端测试
// ==========================================
// 测试目标: 加载 → 查询 → 加入清单 → 改数量 → 合计 → 覆盖主文件
// ==========================================


use spare_parts_finder::app::{AddOutcome, SessionError, StockSession};
use spare_parts_finder::domain::RequestTotals;
use spare_parts_finder::export::ExportFormat;
use spare_parts_finder::importer::ImportError;
use spare_parts_finder::logging;
use test_helpers::{loaded_session, test_config, MemoryMasterStore, EXAMPLE_CSV};

#[tokio::test]
async fn test_example_walkthrough() {
    logging::init_test();

    let mut session =
        loaded_session(MemoryMasterStore::new("stocks1.csv", Some(EXAMPLE_CSV.as_bytes()))).await;
    assert_eq!(session.master_info().unwrap().total_rows, 2);

    // 实时过滤: 两条命中,不显示可用数量
    let view = session.search("m1").expect("search");
    assert_eq!(view.matches.len(), 2);
    assert_eq!(view.available_quantity, None);

    // "型号 - 描述" 唯一命中,自动加入
    let outcome = session.add_to_list("M100 - Blade").expect("add");
    let AddOutcome::Added { line } = outcome else {
        panic!("expected a unique match, got {:?}", outcome);
    };
    assert_eq!(line.model, "M100");
    assert_eq!(line.qty, 1);
    assert_eq!(line.line_total(), 12.5);

    let line = session.set_quantity(0, 4).expect("set qty");
    assert_eq!(line.line_total(), 50.0);

    assert_eq!(
        session.totals(),
        RequestTotals {
            total_items: 1,
            total_qty: 4,
            total_amount: 50.0,
        }
    );
}

#[tokio::test]
async fn test_add_policies() {
    let mut session =
        loaded_session(MemoryMasterStore::new("stocks1.csv", Some(EXAMPLE_CSV.as_bytes()))).await;

    // 无匹配: 清单不变
    let outcome = session.add_to_list("Z9").expect("add");
    assert_eq!(
        outcome,
        AddOutcome::NoMatch {
            query: "Z9".to_string()
        }
    );
    assert!(session.lines().is_empty());

    // 多条匹配: 清单不变,直到给出合法序号
    let AddOutcome::Ambiguous { candidates } = session.add_to_list("M10").expect("add") else {
        panic!("expected ambiguous outcome");
    };
    assert_eq!(candidates.len(), 2);
    assert!(session.lines().is_empty());

    let err = session.confirm_selection(2).unwrap_err();
    assert_eq!(err.code(), "INDEX_OUT_OF_RANGE");
    assert!(session.lines().is_empty());

    let line = session.confirm_selection(1).expect("confirm");
    assert_eq!(line.model, "M101");
    assert_eq!(session.lines().len(), 1);

    // 型号按前缀匹配: "100" 不是任何型号的前缀,描述也不包含
    assert!(matches!(
        session.add_to_list("100").expect("add"),
        AddOutcome::NoMatch { .. }
    ));
    // 而实时过滤按子串匹配
    assert_eq!(session.search("100").expect("search").matches.len(), 1);
}

#[tokio::test]
async fn test_totals_and_clear() {
    let csv = "Model,Description,Price\nA1,Filter,10.00\nB2,Belt,5.50\n";
    let mut session = loaded_session(MemoryMasterStore::new("stocks1.csv", Some(csv.as_bytes()))).await;

    assert_eq!(session.totals(), RequestTotals::default());

    session.add_to_list("A1").expect("add");
    session.add_to_list("B2").expect("add");
    session.set_quantity_from_input(0, "2").expect("qty");
    session.set_quantity_from_input(1, " 3 ").expect("qty");

    let totals = session.totals();
    assert_eq!(totals.total_items, 2);
    assert_eq!(totals.total_qty, 5);
    assert!((totals.total_amount - 36.5).abs() < 1e-9);

    // 负数截断为 0; 非数字输入按 0 处理
    assert_eq!(session.set_quantity(0, -5).expect("qty").qty, 0);
    assert_eq!(session.set_quantity_from_input(1, "lots").expect("qty").qty, 0);

    session.clear_list();
    assert_eq!(session.totals(), RequestTotals::default());
}

#[tokio::test]
async fn test_replace_master_clears_cart() {
    let mut session =
        loaded_session(MemoryMasterStore::new("stocks1.csv", Some(EXAMPLE_CSV.as_bytes()))).await;
    session.add_to_list("M100 - Blade").expect("add");

    let upload = b"Item Code,Desc,Price\nN1,Drill chuck,30\n";
    let info = session
        .replace_master("makita123", "upload.csv", upload)
        .await
        .expect("replace");

    assert_eq!(info.total_rows, 1);
    assert!(session.lines().is_empty());
    assert_eq!(session.store().content().unwrap(), upload.to_vec());
    assert_eq!(session.search("chuck").expect("search").matches[0].model, "N1");
}

#[tokio::test]
async fn test_replace_master_rejections_keep_state() {
    let mut session =
        loaded_session(MemoryMasterStore::new("stocks1.csv", Some(EXAMPLE_CSV.as_bytes()))).await;
    session.add_to_list("M100 - Blade").expect("add");

    let upload = b"Model,Description\nN1,Drill\n";

    let err = session
        .replace_master("MAKITA123", "upload.csv", upload)
        .await
        .unwrap_err();
    assert!(matches!(err, SessionError::AccessDenied));

    let err = session
        .replace_master("makita123", "upload.txt", upload)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        SessionError::Import(ImportError::UnsupportedFormat(_))
    ));

    let err = session
        .replace_master("makita123", "upload.csv", b"Code,Name\nN1,Drill\n")
        .await
        .unwrap_err();
    assert_eq!(err.code(), "SCHEMA_ERROR");
    let message = err.to_string();
    assert!(message.contains("model"));
    assert!(message.contains("material_description"));
    assert!(message.contains("partno"));

    // 原库存表、清单、磁盘内容均未改变
    assert_eq!(session.lines().len(), 1);
    assert_eq!(session.master_info().unwrap().total_rows, 2);
    assert_eq!(session.store().content().unwrap(), EXAMPLE_CSV.as_bytes().to_vec());
}

#[tokio::test]
async fn test_replace_write_failure_keeps_state() {
    let mut store = MemoryMasterStore::new("stocks1.csv", Some(EXAMPLE_CSV.as_bytes()));
    store.fail_writes = true;
    let mut session = loaded_session(store).await;
    session.add_to_list("M100 - Blade").expect("add");

    let err = session
        .replace_master("makita123", "upload.csv", b"Model,Description\nN1,Drill\n")
        .await
        .unwrap_err();
    assert!(matches!(err, SessionError::Import(ImportError::FileWriteError(_))));
    assert_eq!(session.lines().len(), 1);
    assert!(session.is_loaded());
}

#[tokio::test]
async fn test_reload_failure_after_replace_drops_table() {
    let mut store = MemoryMasterStore::new("stocks1.csv", Some(EXAMPLE_CSV.as_bytes()));
    store.corrupt_reads_after_replace = true;
    let mut session = loaded_session(store).await;
    session.add_to_list("M100 - Blade").expect("add");

    let err = session
        .replace_master("makita123", "upload.csv", b"Model,Description\nN1,Drill\n")
        .await
        .unwrap_err();

    assert!(matches!(err, SessionError::ReloadAfterReplace(_)));
    assert!(!session.is_loaded());
    assert!(session.lines().is_empty());
    assert!(matches!(session.search("n1"), Err(SessionError::NoMasterLoaded)));
}

#[tokio::test]
async fn test_missing_master_then_first_upload() {
    let store = MemoryMasterStore::new("stocks1.csv", None);
    let mut session = StockSession::new(test_config(std::path::Path::new("/virtual/stocks1.csv")), store);

    assert!(!session.load_master().await.expect("load"));
    assert!(matches!(session.add_to_list("M1"), Err(SessionError::NoMasterLoaded)));

    session
        .replace_master("makita123", "first.csv", EXAMPLE_CSV.as_bytes())
        .await
        .expect("replace");
    assert_eq!(session.search("guard").expect("search").available_quantity, Some(0));
}

#[tokio::test]
async fn test_unreadable_master_location_is_an_error() {
    let mut store = MemoryMasterStore::new("stocks1.csv", Some(EXAMPLE_CSV.as_bytes()));
    store.fail_exists = true;
    let mut session =
        StockSession::new(test_config(std::path::Path::new("/virtual/stocks1.csv")), store);

    // 存在性无法判断时报错,而不是当作文件缺失
    let err = session.load_master().await.unwrap_err();
    assert!(matches!(err, SessionError::Import(ImportError::FileReadError(_))));
    assert_eq!(err.code(), "IMPORT_ERROR");
    assert!(!session.is_loaded());
}

#[tokio::test]
async fn test_export_from_session() {
    let mut session =
        loaded_session(MemoryMasterStore::new("stocks1.csv", Some(EXAMPLE_CSV.as_bytes()))).await;
    session.add_to_list("Guard").expect("add");
    session.set_quantity(0, 2).expect("qty");

    let bytes = session.export(ExportFormat::Csv).expect("export");
    let text = String::from_utf8(bytes).unwrap();
    assert_eq!(
        text.lines().nth(1).unwrap(),
        "M101,Guard,0,1,0,0,7.00,2,14.00"
    );
}
