//! Format galleries, sheet links, purchases and status as text.

use crate::commands::{GalleryResult, PortalStatus};
use crate::purchases::PurchaseRecord;
use crate::sheets::ActiveSheet;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;

/// Format a section heading with bold/underline.
pub fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

fn table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(header);
    table
}

/// Gallery as one table per brand: person, date, file name, category, URL.
pub fn format_gallery_text(result: &GalleryResult) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{}\n\n",
        format_section_heading(&format!("Gallery: {}", result.view))
    ));
    if result.brands.is_empty() {
        out.push_str("No photos.\n");
        return out;
    }

    let mut total = 0;
    for brand in &result.brands {
        out.push_str(&format!("{}\n", brand.brand.bold()));
        let mut table = table(vec!["Person", "Date", "File", "Category", "URL"]);
        for person in &brand.persons {
            for date in &person.dates {
                for file in &date.files {
                    table.add_row(vec![
                        person.person.clone(),
                        date.date.clone(),
                        file.name.clone(),
                        file.effective_category().to_string(),
                        file.url.clone(),
                    ]);
                    total += 1;
                }
            }
        }
        out.push_str(&format!("{}\n\n", table));
    }
    out.push_str(&format!(
        "Total: {} files in {} brands.\n",
        total,
        result.brands.len()
    ));
    out
}

pub fn format_sheets_text(sheets: &[ActiveSheet]) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Sheets")));
    if sheets.is_empty() {
        out.push_str("No sheets attached.\n");
        return out;
    }
    let mut table = table(vec!["Brand", "Person", "Date", "Name", "URL"]);
    for sheet in sheets {
        table.add_row(vec![
            sheet.brand.clone(),
            sheet.person.clone(),
            sheet.date.clone(),
            sheet.display_name.clone(),
            sheet.embed_url.clone(),
        ]);
    }
    out.push_str(&format!("{}\n\n", table));
    out.push_str(&format!("Total: {} sheets.\n", sheets.len()));
    out
}

pub fn format_purchases_text(purchases: &[PurchaseRecord]) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Purchases")));
    if purchases.is_empty() {
        out.push_str("No purchases recorded.\n");
        return out;
    }
    let mut table = table(vec![
        "Id", "Date", "Supplier", "Total", "Invoices", "Products",
    ]);
    for purchase in purchases {
        table.add_row(vec![
            purchase.id.clone(),
            purchase.date.clone(),
            purchase.supplier.clone(),
            purchase.total_text.clone(),
            purchase.invoice_photo_urls.len().to_string(),
            purchase.product_photo_urls.len().to_string(),
        ]);
    }
    out.push_str(&format!("{}\n\n", table));
    out.push_str(&format!("Total: {} purchases.\n", purchases.len()));
    out
}

pub fn format_status_text(status: &PortalStatus) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Portal Status")));
    out.push_str(&format!("  Brands: {}\n", status.brands));
    out.push_str(&format!("  Persons: {}\n", status.persons));
    out.push_str(&format!("  Dates: {}\n", status.dates));
    out.push_str(&format!("  Photos: {}\n", status.assets));
    out.push_str(&format!("  Active sheets: {}\n", status.active_sheets));
    out.push_str(&format!("  Purchases: {}\n", status.purchases));
    out
}
