//! Fee report example: reconstruct a statement, pick its fees and export them

use statement_ledger::utils::MemoryLocator;
use statement_ledger::{
    CsvRenderer, Glossary, PipelineConfig, RawGrid, SelectionSet, StatementPipeline, ViewKind,
};
use std::path::Path;
use tracing_subscriber::EnvFilter;

const HEADER: [&str; 6] = [
    "Data",
    "Histórico",
    "Docto.",
    "Crédito (R$)",
    "Débito (R$)",
    "Saldo (R$)",
];

fn sample_statement() -> Vec<RawGrid> {
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
        RawGrid::new(0, vec![vec!["Fone Fácil Bradesco"], vec!["4002 0022"]]),
        RawGrid::new(1, vec![
            HEADER.to_vec(),
            vec!["01/01/2023", "TARIFA BANCARIA", "104", "", "-30,00", "1.185,50"],
            vec!["", "SAQUE CAIXA ELETRONICO", "105", "", "-100,00", "1.085,50"],
            vec!["05/01/23", "ENCARGOS LIMITE DE CRED", "106", "", "-7,35", "1.078,15"],
        ]),
    ]
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("🧾 Statement Ledger - Fee Report Example\n");

    let locator = MemoryLocator::new();
    locator.insert("extrato.pdf", sample_statement());

    let config = PipelineConfig::default();
    let slider = config.default_slider;
    let mut pipeline = StatementPipeline::new(locator, config)?.with_glossary(Glossary::new([
        "TARIFA BANCARIA",
        "CESTA FACIL ECONOMICA MENSALIDADE",
        "ENCARGOS LIMITE DE CREDITO",
    ]));

    // 1. Reconstruct the ledger
    println!("📄 Reconstructing ledger...");
    let ledger = pipeline.load_document(Path::new("extrato.pdf"))?;
    for row in ledger.iter() {
        println!(
            "  {:>8} | {:<36} | {:>10} | {:>10}",
            row.date.as_deref().unwrap_or("-"),
            row.description,
            row.credit.as_deref().unwrap_or(""),
            row.debit.as_deref().unwrap_or("")
        );
    }
    let stats = pipeline.stats()?;
    println!(
        "  ✓ {} rows, {} grid(s) discarded, {} continuation(s) merged\n",
        stats.rows_read - stats.rows_merged - stats.rows_dropped,
        stats.grids_discarded,
        stats.rows_merged
    );

    // 2. Match debits against the glossary
    println!("🔍 Matching debits against the fee glossary (slider {:.2})...", slider);
    let matched = pipeline.match_glossary(ViewKind::Debit, slider)?;
    println!("  ✓ {} of the debits look like fees\n", matched.len());

    // 3. Operator checklist: keep everything offered
    println!("☑️  Checklist:");
    let checklist = pipeline.checklist(ViewKind::Debit)?;
    for (i, entry) in checklist.iter().enumerate() {
        println!("  {}", entry.checklist_label(i + 1));
    }
    let selection: SelectionSet = checklist.into_iter().map(|e| e.description).collect();
    pipeline.include(ViewKind::Debit, &selection)?;
    println!();

    // 4. Summarize and export
    println!("📊 Final report (CSV):");
    pipeline.summarize(ViewKind::Debit)?;
    let csv = pipeline.render(ViewKind::Debit, &CsvRenderer::default(), "Tarifas")?;
    println!("{}", String::from_utf8(csv)?);

    println!("✅ Fee report example completed successfully!");
    Ok(())
}
