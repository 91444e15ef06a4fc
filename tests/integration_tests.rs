//! Integration tests for statement-ledger

use statement_ledger::{
    glossary, ledger,
    report::{self, occurrence_ranking},
    utils::MemoryLocator,
    CsvRenderer, Glossary, JsonRenderer, PipelineConfig, PipelineError, RawGrid, RowKind,
    SelectionSet, StatementPipeline, TableReconstructor, View, ViewKind, ViewRow,
};
use std::io::Write;
use std::path::Path;

const HEADER: [&str; 6] = [
    "Data",
    "Histórico",
    "Docto.",
    "Crédito (R$)",
    "Débito (R$)",
    "Saldo (R$)",
];

fn statement_grids() -> Vec<RawGrid> {
    vec![
        RawGrid::new(0, vec![
            vec!["Extrato de: Agência: 1234 | Conta: 56789-0"],
            HEADER.to_vec(),
            vec!["", "SALDO ANTERIOR", "", "", "", "1.000,00"],
            vec!["03/01/2023", "TARIFA BANCARIA", "101", "", "-20,00", "980,00"],
            vec!["", "CESTA FACIL ECONOMICA", "", "", "", ""],
            vec!["", "MENSALIDADE", "102", "", "-14,50", "965,50"],
            vec!["", "TRANSFERENCIA PIX", "103", "250,00", "", "1.215,50"],
        ]),
        RawGrid::new(0, vec![
            vec!["Se Preferir, fale com a BIA pelo"],
            vec!["WhatsApp (11) 3335 0237"],
        ]),
        RawGrid::new(1, vec![
            HEADER.to_vec(),
            vec!["01/01/2023", "TARIFA BANCARIA", "104", "", "-30,00", "1.185,50"],
            vec!["", "SAQUE CAIXA ELETRONICO", "105", "", "-100,00", "1.085,50"],
            vec!["05/01/23", "ENCARGOS LIMITE DE CRED", "106", "", "-7,35", "1.078,15"],
        ]),
    ]
}

fn fee_glossary() -> Glossary {
    Glossary::new([
        "TARIFA BANCARIA",
        "CESTA FACIL ECONOMICA MENSALIDADE",
        "ENCARGOS LIMITE DE CREDITO",
    ])
}

fn pipeline() -> StatementPipeline<MemoryLocator> {
    let locator = MemoryLocator::new();
    locator.insert("extrato.pdf", statement_grids());
    StatementPipeline::new(locator, PipelineConfig::default())
        .unwrap()
        .with_glossary(fee_glossary())
}

fn selection(items: &[&str]) -> SelectionSet {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_complete_fee_report_workflow() {
    let mut pipeline = pipeline();

    let ledger = pipeline.load_document(Path::new("extrato.pdf")).unwrap();
    assert_eq!(ledger.len(), 7);
    assert_eq!(
        ledger.rows()[2].description,
        "CESTA FACIL ECONOMICA MENSALIDADE"
    );

    let stats = pipeline.stats().unwrap();
    assert_eq!(stats.grids_seen, 3);
    assert_eq!(stats.grids_discarded, 1);
    assert_eq!(stats.headers_stripped, 2);
    assert_eq!(stats.rows_merged, 1);

    // Debit side: everything with a debit amount
    assert_eq!(pipeline.view(ViewKind::Debit).unwrap().len(), 5);
    assert_eq!(pipeline.view(ViewKind::Credit).unwrap().len(), 1);

    let matched = pipeline.match_glossary(ViewKind::Debit, 0.85).unwrap();
    let kept: Vec<&str> = matched.rows().iter().map(|r| r.description.as_str()).collect();
    assert_eq!(
        kept,
        vec![
            "TARIFA BANCARIA",
            "CESTA FACIL ECONOMICA MENSALIDADE",
            "TARIFA BANCARIA",
            "ENCARGOS LIMITE DE CRED",
        ]
    );

    let labels: Vec<String> = pipeline
        .checklist(ViewKind::Debit)
        .unwrap()
        .iter()
        .enumerate()
        .map(|(i, entry)| entry.checklist_label(i + 1))
        .collect();
    assert_eq!(
        labels,
        vec![
            "1- CESTA FACIL ECONOMICA MENSALIDADE (1 vez)",
            "2- ENCARGOS LIMITE DE CRED (1 vez)",
            "3- TARIFA BANCARIA (2 vezes)",
        ]
    );

    pipeline
        .include(
            ViewKind::Debit,
            &selection(&["TARIFA BANCARIA", "ENCARGOS LIMITE DE CRED"]),
        )
        .unwrap();
    let report = pipeline.summarize(ViewKind::Debit).unwrap();

    let rows: Vec<(&str, &str, &str)> = report
        .rows
        .iter()
        .map(|r| (r.date.as_str(), r.description.as_str(), r.amount.as_str()))
        .collect();
    assert_eq!(
        rows,
        vec![
            ("01/01/23", "TARIFA BANCARIA", "-30,00"),
            ("03/01/23", "TARIFA BANCARIA", "-20,00"),
            ("05/01/23", "ENCARGOS LIMITE DE CRED", "-7,35"),
            ("", "Valor Total (R$)", "57,35"),
            ("", "Em dobro (R$)", "114,70"),
        ]
    );

    let csv = pipeline
        .render(ViewKind::Debit, &CsvRenderer::default(), "Tarifas")
        .unwrap();
    let csv = String::from_utf8(csv).unwrap();
    assert!(csv.starts_with("Data;Histórico;Docto.;Débito (R$)"));
    assert!(csv.contains(";Em dobro (R$);;114,70"));
}

#[test]
fn test_end_to_end_chronological_totals() {
    let grids = vec![RawGrid::new(0, vec![
        HEADER.to_vec(),
        vec!["02/01/23", "TARIFA", "1", "", "20,00", ""],
        vec!["01/01/23", "TARIFA", "2", "", "30,00", ""],
    ])];

    let mut pipeline = StatementPipeline::new(MemoryLocator::new(), PipelineConfig::default())
        .unwrap()
        .with_glossary(Glossary::new(["TARIFA"]));
    pipeline.load_grids(&grids);
    pipeline.match_glossary_threshold(ViewKind::Debit, 85).unwrap();
    pipeline.include(ViewKind::Debit, &selection(&["TARIFA"])).unwrap();

    let report = pipeline.summarize(ViewKind::Debit).unwrap();
    let summary: Vec<(RowKind, &str, &str)> = report
        .rows
        .iter()
        .map(|r| (r.kind, r.date.as_str(), r.amount.as_str()))
        .collect();
    assert_eq!(
        summary,
        vec![
            (RowKind::Transaction, "01/01/23", "30,00"),
            (RowKind::Transaction, "02/01/23", "20,00"),
            (RowKind::Total, "", "50,00"),
            (RowKind::DoubleTotal, "", "100,00"),
        ]
    );
}

#[test]
fn test_stages_compose_as_plain_functions() {
    let reconstruction = TableReconstructor::default().reconstruct(&statement_grids());
    let debit = ledger::to_debit_view(&reconstruction.ledger);
    let matched = glossary::filter_view(&debit, &fee_glossary(), 85);
    let included = report::apply(&matched, &selection(&["TARIFA BANCARIA"]));
    let table = report::summarize(&included);

    assert_eq!(table.transactions().count(), 2);
    assert_eq!(statement_ledger::parse::amount::format(&table.total), "50,00");

    let ranking = occurrence_ranking(&matched);
    assert_eq!(ranking[0].description, "TARIFA BANCARIA");
    assert_eq!(ranking[0].occurrences, 2);
}

#[test]
fn test_empty_selection_summarizes_to_zero() {
    let mut pipeline = pipeline();
    pipeline.load_document(Path::new("extrato.pdf")).unwrap();
    pipeline.match_glossary(ViewKind::Debit, 0.85).unwrap();

    let included = pipeline.include(ViewKind::Debit, &SelectionSet::new()).unwrap();
    assert!(included.is_empty());

    let report = pipeline.summarize(ViewKind::Debit).unwrap();
    let amounts: Vec<&str> = report.rows.iter().map(|r| r.amount.as_str()).collect();
    assert_eq!(amounts, vec!["0,00", "0,00"]);
}

#[test]
fn test_reinclusion_replaces_previous_result() {
    let mut pipeline = pipeline();
    pipeline.load_document(Path::new("extrato.pdf")).unwrap();
    pipeline.match_glossary(ViewKind::Debit, 0.85).unwrap();

    pipeline
        .include(ViewKind::Debit, &selection(&["TARIFA BANCARIA"]))
        .unwrap();
    let second = pipeline
        .include(ViewKind::Debit, &selection(&["ENCARGOS LIMITE DE CRED"]))
        .unwrap();
    assert_eq!(second.len(), 1);
}

#[test]
fn test_credit_side_report() {
    let mut pipeline = pipeline().with_glossary(Glossary::new(["TRANSFERENCIA PIX"]));
    pipeline.load_document(Path::new("extrato.pdf")).unwrap();
    pipeline.match_glossary(ViewKind::Credit, 1.0).unwrap();
    pipeline
        .include(ViewKind::Credit, &selection(&["TRANSFERENCIA PIX"]))
        .unwrap();
    pipeline.summarize(ViewKind::Credit).unwrap();

    let json = pipeline
        .render(ViewKind::Credit, &JsonRenderer, "Créditos")
        .unwrap();
    let value: serde_json::Value = serde_json::from_slice(&json).unwrap();
    assert_eq!(value["columns"][3], "Crédito (R$)");
    assert_eq!(value["total"], "250,00");
    assert_eq!(value["rows"][0]["date"], "03/01/23");
}

#[test]
fn test_extraction_failure_is_fatal() {
    let locator = MemoryLocator::new();
    locator.fail_on("corrompido.pdf", "glyph table missing");
    let mut pipeline = StatementPipeline::new(locator, PipelineConfig::default()).unwrap();

    let err = pipeline
        .load_document(Path::new("corrompido.pdf"))
        .unwrap_err();
    assert!(matches!(err, PipelineError::Extraction(_)));
    assert!(matches!(
        pipeline.view(ViewKind::Debit),
        Err(PipelineError::StageNotReady(_))
    ));
}

#[test]
fn test_config_and_glossary_files() {
    let dir = tempfile::tempdir().unwrap();
    let glossary_path = dir.path().join("Tarifas.txt");
    let mut glossary_file = std::fs::File::create(&glossary_path).unwrap();
    writeln!(glossary_file, "TARIFA BANCARIA").unwrap();
    writeln!(glossary_file).unwrap();
    writeln!(glossary_file, "ENCARGOS LIMITE DE CREDITO").unwrap();

    let config_path = dir.path().join("pipeline.toml");
    std::fs::write(
        &config_path,
        format!(
            "default_slider = 0.9\nrow_tolerance = 12\nglossary_path = {:?}\n",
            glossary_path.display().to_string()
        ),
    )
    .unwrap();

    let config = PipelineConfig::load(&config_path).unwrap();
    assert_eq!(config.row_tolerance, 12);
    assert_eq!(config.default_threshold().unwrap(), 90);

    let pipeline = StatementPipeline::new(MemoryLocator::new(), config).unwrap();
    assert_eq!(pipeline.glossary().terms(), ["TARIFA BANCARIA", "ENCARGOS LIMITE DE CREDITO"]);
}

#[test]
fn test_missing_glossary_matches_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let config = PipelineConfig {
        glossary_path: Some(dir.path().join("ausente.txt")),
        ..PipelineConfig::default()
    };

    let locator = MemoryLocator::new();
    locator.insert("extrato.pdf", statement_grids());
    let mut pipeline = StatementPipeline::new(locator, config).unwrap();
    pipeline.load_document(Path::new("extrato.pdf")).unwrap();

    assert!(pipeline.glossary().is_empty());
    assert!(pipeline.match_glossary(ViewKind::Debit, 0.5).unwrap().is_empty());
}

#[test]
fn test_view_rows_keep_ledger_order() {
    let view = View::new(
        ViewKind::Debit,
        vec![
            ViewRow {
                date: Some("02/01/23".to_string()),
                description: "B".to_string(),
                document_no: "2".to_string(),
                amount: "1,00".to_string(),
            },
            ViewRow {
                date: Some("01/01/23".to_string()),
                description: "A".to_string(),
                document_no: "1".to_string(),
                amount: "1,00".to_string(),
            },
        ],
    );
    let kept = report::apply(&view, &selection(&["A", "B"]));
    assert_eq!(kept.rows()[0].description, "B");
}
