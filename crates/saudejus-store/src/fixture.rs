//! Built-in simulated dataset: 17 health-litigation decisions, 2018–2024.
//!
//! Values are raw (upper-case court codes) and go through the same
//! normalization as any loaded file.

use saudejus_core::RawCaseRecord;

const ART_196: &str = "Art. 196 CF";
const TEMA_106: &str = "Tema 106 STJ";

/// `(year, request type, court, claim value, outcome, legal basis)`
const ROWS: &[(i32, &str, &str, f64, &str, &str)] = &[
    (2018, "Medicamento", "TJSP", 15000.00, "Procedente", ART_196),
    (2019, "Tratamento", "TJRJ", 50000.00, "Improcedente", TEMA_106),
    (2020, "Medicamento", "TJMG", 5000.00, "Procedente", ART_196),
    (2021, "Insumo", "TJSP", 2500.00, "Procedente", ART_196),
    (2021, "Medicamento", "TJDF", 8000.00, "Procedente", ART_196),
    (2022, "Cirurgia", "TJRJ", 100000.00, "Improcedente", "Súmula X"),
    (2022, "Medicamento", "TJSP", 7500.00, "Procedente", ART_196),
    (2023, "Tratamento", "TJRS", 30000.00, "Procedente", TEMA_106),
    (2023, "Medicamento", "TJMG", 6000.00, "Procedente", ART_196),
    (2024, "Medicamento", "TJSP", 12000.00, "Procedente", ART_196),
    (2024, "Tratamento", "TJRJ", 45000.00, "Improcedente", TEMA_106),
    (2023, "Medicamento", "TJSP", 9000.00, "Procedente", ART_196),
    (2022, "Insumo", "TJMG", 3000.00, "Procedente", ART_196),
    (2021, "Tratamento", "TJRS", 15000.00, "Improcedente", TEMA_106),
    (2020, "Medicamento", "TJSP", 5500.00, "Procedente", ART_196),
    (2023, "Medicamento", "TJDF", 7000.00, "Procedente", ART_196),
    (2022, "Cirurgia", "TJRJ", 85000.00, "Improcedente", "Súmula Y"),
];

pub(crate) fn simulated_rows() -> impl Iterator<Item = RawCaseRecord> {
    ROWS.iter()
        .map(|&(year, request, court, value, outcome, basis)| {
            RawCaseRecord::new(year, request, court, value, outcome, basis)
        })
}
