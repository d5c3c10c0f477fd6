//! Category renderings for templates without layout elements

use crate::parser::value_to_string;
use crate::schema::{Template, TemplateCategory};
use crate::{DataMap, Result};
use pdf_core::{Align, Paragraph, PdfDocument, Table};

const FIELD_HEADER: &str = "Alan";
const VALUE_HEADER: &str = "Değer";
const KEY_VALUE_WIDTHS: [f32; 2] = [30.0, 70.0];
const TITLE_SIZE: f32 = 18.0;
const SECTION_SIZE: f32 = 14.0;

/// Render the fixed layout for the template's category
///
/// The title is `data.title` when present and not null, the template name
/// otherwise.
pub fn render_category(doc: &mut PdfDocument, template: &Template, data: &DataMap) -> Result<()> {
    let title = data
        .get("title")
        .filter(|v| !v.is_null())
        .map(value_to_string)
        .unwrap_or_else(|| template.name.clone());
    doc.add_paragraph(title_paragraph(title));

    match template.category {
        TemplateCategory::CreditCardStatement => render_credit_card(doc, data)?,
        TemplateCategory::HealthInsurancePolicy => doc.add_table(labelled_table(
            "Poliçe Bilgileri",
            &[
                ("Poliçe No", "policy_number"),
                ("Sigortalı", "insured_name"),
                ("Prim Tutarı", "premium_amount"),
            ],
            data,
        )?),
        TemplateCategory::AccountStatement => doc.add_table(labelled_table(
            "Hesap Bilgileri",
            &[
                ("Hesap No", "account_number"),
                ("Hesap Sahibi", "account_holder"),
                ("Bakiye", "balance"),
            ],
            data,
        )?),
        TemplateCategory::PaymentReceipt => doc.add_table(labelled_table(
            "Ödeme Bilgileri",
            &[
                ("Makbuz No", "receipt_number"),
                ("Ödeyen", "payer_name"),
                ("Tutar", "amount"),
                ("Tarih", "payment_date"),
            ],
            data,
        )?),
        _ => doc.add_table(all_fields_table(data, |_| true)?),
    }

    Ok(())
}

/// Render the title and (for non-empty data) a table of every field but `title`
pub fn render_basic(doc: &mut PdfDocument, data: &DataMap, default_title: &str) -> Result<()> {
    let title = data
        .get("title")
        .filter(|v| !v.is_null())
        .map(value_to_string)
        .unwrap_or_else(|| default_title.to_string());
    doc.add_paragraph(title_paragraph(title));

    if !data.is_empty() {
        doc.add_table(all_fields_table(data, |key| key != "title")?);
    }
    Ok(())
}

fn render_credit_card(doc: &mut PdfDocument, data: &DataMap) -> Result<()> {
    doc.add_table(labelled_table(
        "Müşteri Bilgileri",
        &[
            ("Müşteri Adı", "customer_name"),
            ("Müşteri No", "customer_id"),
            ("Kart No", "card_number"),
        ],
        data,
    )?);
    doc.add_paragraph(Paragraph::new("\n"));

    if let Some(transactions) = data.get("transactions") {
        doc.add_paragraph(
            Paragraph::new("İşlem Detayları")
                .bold()
                .font_size(SECTION_SIZE),
        );

        let mut table = Table::new(vec![20.0, 40.0, 20.0, 20.0])?;
        for header in ["Tarih", "Açıklama", "Tutar", "Bakiye"] {
            table.add_header_cell(Paragraph::new(header).bold());
        }
        // Transaction contents are not itemized; a sample row marks their presence
        if !transactions.is_null() {
            for cell in ["01/01/2025", "Örnek İşlem", "1.000,00 TL", "5.000,00 TL"] {
                table.add_cell(Paragraph::new(cell));
            }
        }
        doc.add_table(table);
    }
    Ok(())
}

fn title_paragraph(title: String) -> Paragraph {
    Paragraph::new(title)
        .font_size(TITLE_SIZE)
        .bold()
        .align(Align::Center)
}

fn key_value_table(header: &str) -> Result<Table> {
    let mut table = Table::new(KEY_VALUE_WIDTHS.to_vec())?;
    table.add_header_cell(Paragraph::new(header).bold());
    table.add_header_cell(Paragraph::new(VALUE_HEADER).bold());
    Ok(table)
}

/// Two-column table of `(label, data key)` pairs; missing keys show empty
fn labelled_table(header: &str, fields: &[(&str, &str)], data: &DataMap) -> Result<Table> {
    let mut table = key_value_table(header)?;
    for (label, key) in fields {
        table.add_cell(Paragraph::new(*label));
        table.add_cell(Paragraph::new(
            data.get(*key).map(value_to_string).unwrap_or_default(),
        ));
    }
    Ok(table)
}

fn all_fields_table(data: &DataMap, include: impl Fn(&str) -> bool) -> Result<Table> {
    let mut table = key_value_table(FIELD_HEADER)?;
    for (key, value) in data.iter().filter(|(k, _)| include(k)) {
        table.add_cell(Paragraph::new(key.clone()));
        table.add_cell(Paragraph::new(value_to_string(value)));
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdf_core::{Block, PageSize};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn rows(block: &Block) -> Vec<Vec<String>> {
        let Block::Table(table) = block else {
            panic!("expected table, got {block:?}");
        };
        table
            .header_rows()
            .chain(table.body_rows())
            .map(|row| row.iter().map(|c| c.text.clone()).collect())
            .collect()
    }

    fn text(block: &Block) -> &str {
        match block {
            Block::Paragraph(p) => &p.text,
            other => panic!("expected paragraph, got {other:?}"),
        }
    }

    fn render(category: TemplateCategory, data: serde_json::Value) -> PdfDocument {
        let template = Template::new("t1", "Template Name", category);
        let mut doc = PdfDocument::new(PageSize::A4);
        render_category(&mut doc, &template, &crate::data_from_value(data)).unwrap();
        doc
    }

    #[test]
    fn test_payment_receipt() {
        let doc = render(
            TemplateCategory::PaymentReceipt,
            json!({ "receipt_number": "R-1", "payer_name": "Ayşe", "amount": 250 }),
        );

        assert_eq!(doc.blocks().len(), 2);
        assert_eq!(text(&doc.blocks()[0]), "Template Name");
        assert_eq!(
            rows(&doc.blocks()[1]),
            vec![
                vec!["Ödeme Bilgileri", "Değer"],
                vec!["Makbuz No", "R-1"],
                vec!["Ödeyen", "Ayşe"],
                vec!["Tutar", "250"],
                vec!["Tarih", ""],
            ]
        );
    }

    #[test]
    fn test_title_from_data() {
        let doc = render(TemplateCategory::AccountStatement, json!({ "title": "Ekstre" }));
        assert_eq!(text(&doc.blocks()[0]), "Ekstre");

        let doc = render(TemplateCategory::AccountStatement, json!({ "title": null }));
        assert_eq!(text(&doc.blocks()[0]), "Template Name");
    }

    #[test]
    fn test_health_insurance_and_account() {
        let doc = render(
            TemplateCategory::HealthInsurancePolicy,
            json!({ "policy_number": "P-9" }),
        );
        assert_eq!(rows(&doc.blocks()[1])[1], vec!["Poliçe No", "P-9"]);

        let doc = render(TemplateCategory::AccountStatement, json!({ "balance": "1.250,00" }));
        assert_eq!(rows(&doc.blocks()[1])[3], vec!["Bakiye", "1.250,00"]);
    }

    #[test]
    fn test_credit_card_with_transactions() {
        let doc = render(
            TemplateCategory::CreditCardStatement,
            json!({ "customer_name": "Ali", "transactions": [{ "amount": 10 }] }),
        );

        assert_eq!(doc.blocks().len(), 5);
        assert_eq!(rows(&doc.blocks()[1])[1], vec!["Müşteri Adı", "Ali"]);
        assert_eq!(text(&doc.blocks()[2]), "\n");
        assert_eq!(text(&doc.blocks()[3]), "İşlem Detayları");
        assert_eq!(
            rows(&doc.blocks()[4]),
            vec![
                vec!["Tarih", "Açıklama", "Tutar", "Bakiye"],
                vec!["01/01/2025", "Örnek İşlem", "1.000,00 TL", "5.000,00 TL"],
            ]
        );
    }

    #[test]
    fn test_credit_card_null_transactions() {
        let doc = render(
            TemplateCategory::CreditCardStatement,
            json!({ "transactions": null }),
        );
        assert_eq!(doc.blocks().len(), 5);
        assert_eq!(rows(&doc.blocks()[4]).len(), 1);

        let doc = render(TemplateCategory::CreditCardStatement, json!({}));
        assert_eq!(doc.blocks().len(), 3);
    }

    #[test]
    fn test_generic_category_lists_all_fields() {
        let doc = render(TemplateCategory::Invoice, json!({ "title": "Fatura", "no": 7 }));
        assert_eq!(
            rows(&doc.blocks()[1]),
            vec![
                vec!["Alan", "Değer"],
                vec!["title", "Fatura"],
                vec!["no", "7"],
            ]
        );
    }

    #[test]
    fn test_basic_rendering() {
        let mut doc = PdfDocument::new(PageSize::A4);
        let data = crate::data_from_value(json!({ "title": "Report", "a": 1, "b": "x" }));
        render_basic(&mut doc, &data, "Generated Document").unwrap();

        assert_eq!(text(&doc.blocks()[0]), "Report");
        assert_eq!(
            rows(&doc.blocks()[1]),
            vec![vec!["Alan", "Değer"], vec!["a", "1"], vec!["b", "x"]]
        );
    }

    #[test]
    fn test_basic_rendering_empty_data() {
        let mut doc = PdfDocument::new(PageSize::A4);
        render_basic(&mut doc, &DataMap::new(), "Generated Document").unwrap();

        assert_eq!(doc.blocks().len(), 1);
        let Block::Paragraph(title) = &doc.blocks()[0] else {
            panic!("expected title");
        };
        assert_eq!(title.text, "Generated Document");
        assert_eq!(title.font_size, 18.0);
        assert_eq!(title.align, Align::Center);
    }
}
