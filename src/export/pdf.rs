//! PDF export of the trial balance
//!
//! The report is first laid out as plain data: pages of positioned text runs
//! and rules, with y measured in millimetres from the top edge. Rendering
//! hands that layout to `printpdf` using the builtin Helvetica faces.

use printpdf::{BuiltinFont, IndirectFontRef, Line, Mm, PdfDocument, Point};

use super::{ExportOptions, ReportHeader};
use crate::error::{LedgerError, LedgerResult};
use crate::models::TrialBalanceData;

/// A4 portrait
pub const PAGE_WIDTH_MM: f32 = 210.0;
pub const PAGE_HEIGHT_MM: f32 = 297.0;
pub const MARGIN_MM: f32 = 20.0;
pub const LINE_HEIGHT_MM: f32 = 6.0;

const COLUMN_HEADERS: [&str; 6] = ["Account Name", "Category", "Particulars", "Debit", "Credit", "Balance"];
const COLUMN_WIDTHS: [f32; 6] = [50.0, 25.0, 40.0, 20.0, 20.0, 20.0];
const ACCOUNT_NAME_MAX: usize = 25;
const PARTICULARS_MAX: usize = 20;

const CATEGORY_BREAK_MM: f32 = 40.0;
const ROW_BREAK_MM: f32 = 30.0;
const DETAILS_BREAK_MM: f32 = 50.0;
/// Room for the rule and the three totals lines
const TOTALS_BREAK_MM: f32 = 50.0;
const FOOTER_OFFSET_MM: f32 = 10.0;

const PT_TO_MM: f32 = 0.3528;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Normal,
    Bold,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub weight: FontWeight,
    pub text: String,
}

/// A horizontal line
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub x1: f32,
    pub x2: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PdfPage {
    pub texts: Vec<TextRun>,
    pub rules: Vec<Rule>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PdfLayout {
    pub width: f32,
    pub height: f32,
    pub pages: Vec<PdfPage>,
}

impl PdfLayout {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextRun> {
        self.pages.iter().flat_map(|p| p.texts.iter())
    }
}

struct LayoutBuilder {
    layout: PdfLayout,
    y: f32,
    size: f32,
    weight: FontWeight,
}

impl LayoutBuilder {
    fn new() -> Self {
        Self {
            layout: PdfLayout {
                width: PAGE_WIDTH_MM,
                height: PAGE_HEIGHT_MM,
                pages: vec![PdfPage::default()],
            },
            y: MARGIN_MM,
            size: 10.0,
            weight: FontWeight::Normal,
        }
    }

    fn font(&mut self, size: f32, weight: FontWeight) {
        self.size = size;
        self.weight = weight;
    }

    fn weight(&mut self, weight: FontWeight) {
        self.weight = weight;
    }

    fn page(&mut self) -> &mut PdfPage {
        let last = self.layout.pages.len() - 1;
        &mut self.layout.pages[last]
    }

    fn text_at(&mut self, x: f32, y: f32, text: impl Into<String>) {
        let run = TextRun {
            x,
            y,
            size: self.size,
            weight: self.weight,
            text: text.into(),
        };
        self.page().texts.push(run);
    }

    fn text(&mut self, x: f32, text: impl Into<String>) {
        let y = self.y;
        self.text_at(x, y, text);
    }

    fn centered(&mut self, text: &str) {
        let x = ((self.layout.width - text_width(text, self.size)) / 2.0).max(0.0);
        self.text(x, text);
    }

    fn rule(&mut self, y: f32) {
        let rule = Rule {
            x1: MARGIN_MM,
            x2: self.layout.width - MARGIN_MM,
            y,
        };
        self.page().rules.push(rule);
    }

    /// Start a new page once `y` passes `page_height - reserve`
    fn break_if_past(&mut self, reserve: f32) {
        if self.y > self.layout.height - reserve {
            self.layout.pages.push(PdfPage::default());
            self.y = MARGIN_MM;
        }
    }

    fn advance(&mut self, mm: f32) {
        self.y += mm;
    }

    fn finish(self) -> PdfLayout {
        self.layout
    }
}

/// Approximate Helvetica advance: about half an em per glyph
fn text_width(text: &str, size_pt: f32) -> f32 {
    text.chars().count() as f32 * size_pt * PT_TO_MM * 0.5
}

/// Shorten to at most `max` characters, ending in `...`
pub fn truncate_text(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", kept)
}

/// Lay out the trial balance report page by page
pub fn build_trial_balance_layout(
    data: &TrialBalanceData,
    header: &ReportHeader,
    options: ExportOptions,
) -> PdfLayout {
    let mut b = LayoutBuilder::new();

    b.font(16.0, FontWeight::Bold);
    b.centered(&header.company_name);
    b.advance(8.0);
    b.font(10.0, FontWeight::Normal);
    b.centered(&header.department);
    b.advance(15.0);

    b.font(14.0, FontWeight::Bold);
    b.centered("Trial Balance Report");
    b.advance(10.0);
    b.font(10.0, FontWeight::Normal);
    b.centered(&format!("Period: {}", data.date_range));
    b.advance(8.0);
    b.centered(&format!(
        "Generated: {}",
        data.generated_at.format("%Y-%m-%d %H:%M:%S")
    ));
    b.advance(15.0);

    b.font(9.0, FontWeight::Bold);
    let mut x = MARGIN_MM;
    for (label, width) in COLUMN_HEADERS.iter().zip(COLUMN_WIDTHS) {
        b.text(x, *label);
        x += width;
    }
    b.advance(LINE_HEIGHT_MM + 2.0);
    let rule_y = b.y - 2.0;
    b.rule(rule_y);
    b.advance(2.0);
    b.weight(FontWeight::Normal);

    let balance_column_x = MARGIN_MM + COLUMN_WIDTHS[..5].iter().sum::<f32>();

    for category in &data.categories {
        b.break_if_past(CATEGORY_BREAK_MM);
        b.weight(FontWeight::Bold);
        b.text(MARGIN_MM, category.name.as_str());
        b.advance(LINE_HEIGHT_MM);
        b.weight(FontWeight::Normal);

        for account in category.visible_accounts(options.include_zero_balances) {
            b.break_if_past(ROW_BREAK_MM);
            let cells = [
                truncate_text(&account.account_name, ACCOUNT_NAME_MAX),
                category.name.to_string(),
                truncate_text(&account.particulars, PARTICULARS_MAX),
                account.debit_amount.to_string(),
                account.credit_amount.to_string(),
                account.net_balance.to_string(),
            ];
            let mut x = MARGIN_MM;
            for (cell, width) in cells.into_iter().zip(COLUMN_WIDTHS) {
                b.text(x, cell);
                x += width;
            }
            b.advance(LINE_HEIGHT_MM);
        }

        b.weight(FontWeight::Bold);
        b.text(balance_column_x, category.subtotal.to_string());
        b.advance(LINE_HEIGHT_MM + 3.0);
        b.weight(FontWeight::Normal);
    }

    b.break_if_past(TOTALS_BREAK_MM);
    b.advance(5.0);
    let totals_y = b.y;
    b.rule(totals_y);
    b.advance(8.0);
    b.weight(FontWeight::Bold);
    b.text(MARGIN_MM, format!("Total Debits: {}", data.total_debits));
    b.advance(LINE_HEIGHT_MM);
    b.text(MARGIN_MM, format!("Total Credits: {}", data.total_credits));
    b.advance(LINE_HEIGHT_MM);
    b.text(MARGIN_MM, format!("Final Balance: {}", data.final_balance));
    b.advance(LINE_HEIGHT_MM + 5.0);

    if options.include_calculation_details {
        b.break_if_past(DETAILS_BREAK_MM);
        b.weight(FontWeight::Bold);
        b.text(MARGIN_MM, "Calculation Details:");
        b.advance(8.0);
        b.weight(FontWeight::Normal);
        b.text(MARGIN_MM, format!("Expression: {}", data.calculation_expression));
        b.advance(6.0);
        b.text(MARGIN_MM, format!("Total Transactions: {}", data.total_transactions));
        b.advance(10.0);
    }

    let mut layout = b.finish();
    add_footers(&mut layout, &data.generated_at.format("%Y-%m-%d").to_string());
    layout
}

fn add_footers(layout: &mut PdfLayout, generated_on: &str) {
    let total = layout.pages.len();
    let y = layout.height - FOOTER_OFFSET_MM;
    let page_x = layout.width - 30.0;
    for (index, page) in layout.pages.iter_mut().enumerate() {
        let footer = |x: f32, text: String| TextRun {
            x,
            y,
            size: 8.0,
            weight: FontWeight::Normal,
            text,
        };
        page.texts
            .push(footer(page_x, format!("Page {} of {}", index + 1, total)));
        page.texts
            .push(footer(MARGIN_MM, format!("Generated on {}", generated_on)));
    }
}

/// Render a layout to PDF bytes
pub fn render_pdf(layout: &PdfLayout, title: &str) -> LedgerResult<Vec<u8>> {
    let (width, height) = (Mm(layout.width), Mm(layout.height));
    let (doc, first_page, first_layer) = PdfDocument::new(title, width, height, "Layer 1");
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(pdf_err)?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(pdf_err)?;

    for (index, page) in layout.pages.iter().enumerate() {
        let layer = if index == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page_index, layer_index) = doc.add_page(width, height, "Layer 1");
            doc.get_page(page_index).get_layer(layer_index)
        };

        for run in &page.texts {
            let font: &IndirectFontRef = match run.weight {
                FontWeight::Normal => &regular,
                FontWeight::Bold => &bold,
            };
            layer.use_text(
                run.text.clone(),
                run.size,
                Mm(run.x),
                Mm(layout.height - run.y),
                font,
            );
        }

        for rule in &page.rules {
            let y = Mm(layout.height - rule.y);
            layer.add_line(Line {
                points: vec![
                    (Point::new(Mm(rule.x1), y), false),
                    (Point::new(Mm(rule.x2), y), false),
                ],
                is_closed: false,
            });
        }
    }

    doc.save_to_bytes().map_err(pdf_err)
}

fn pdf_err(e: printpdf::Error) -> LedgerError {
    LedgerError::Export(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AccountBalance, AccountCategory, AccountCategoryType, DateRange, Money};
    use chrono::NaiveDate;

    fn account(i: usize, balance: i64) -> AccountBalance {
        AccountBalance {
            account_id: format!("a{}", i),
            account_name: format!("Fabric supplier account number {}", i),
            category_description: String::new(),
            particulars: "Knit fabric for joggers order".into(),
            debit_amount: Money::from_units(-balance.abs()),
            credit_amount: Money::zero(),
            net_balance: Money::from_units(balance),
            transaction_count: 1,
        }
    }

    fn data(accounts: usize) -> TrialBalanceData {
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        );
        let mut data = TrialBalanceData::placeholder(range);
        data.categories = vec![AccountCategory {
            name: AccountCategoryType::Expenses,
            accounts: (0..accounts).map(|i| account(i, -100)).chain([account(999, 0)]).collect(),
            subtotal: Money::from_units(-100 * accounts as i64),
        }];
        data.calculation_expression = "-100 = -100".into();
        data
    }

    fn has_text(layout: &PdfLayout, text: &str) -> bool {
        layout.texts().any(|t| t.text == text)
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("Short", 25), "Short");
        assert_eq!(
            truncate_text("Fabric supplier account number 1", 25),
            "Fabric supplier accoun..."
        );
        assert_eq!(truncate_text("Knit fabric for joggers order", 20).chars().count(), 20);
    }

    #[test]
    fn test_single_page_report() {
        let layout = build_trial_balance_layout(&data(3), &ReportHeader::default(), ExportOptions::default());
        assert_eq!(layout.page_count(), 1);
        assert!(has_text(&layout, "Trial Balance Report"));
        assert!(has_text(&layout, "Period: 2024-01-01 to 2024-01-31"));
        assert!(has_text(&layout, "Fabric supplier accoun..."));
        assert!(has_text(&layout, "-300.00"));
        assert!(has_text(&layout, "Page 1 of 1"));
        assert!(!has_text(&layout, "Calculation Details:"));
        // zero-balance account 999 is hidden
        assert_eq!(
            layout.texts().filter(|t| t.text.starts_with("Fabric supplier")).count(),
            3
        );

        let subtotal = layout.texts().find(|t| t.text == "-300.00").unwrap();
        assert_eq!(subtotal.x, MARGIN_MM + 155.0);
        assert_eq!(subtotal.weight, FontWeight::Bold);
    }

    #[test]
    fn test_long_report_breaks_pages() {
        let layout = build_trial_balance_layout(
            &data(80),
            &ReportHeader::default(),
            ExportOptions {
                include_calculation_details: true,
                include_zero_balances: false,
            },
        );
        let pages = layout.page_count();
        assert!(pages >= 2);
        for page in &layout.pages {
            for run in &page.texts {
                assert!(run.y <= PAGE_HEIGHT_MM - 10.0);
            }
        }
        assert!(has_text(&layout, &format!("Page {} of {}", pages, pages)));
        assert!(has_text(&layout, "Expression: -100 = -100"));
    }

    #[test]
    fn test_body_text_stays_above_footer_for_any_length() {
        let footer_y = PAGE_HEIGHT_MM - FOOTER_OFFSET_MM;
        for accounts in 1..=120 {
            for details in [false, true] {
                let layout = build_trial_balance_layout(
                    &data(accounts),
                    &ReportHeader::default(),
                    ExportOptions {
                        include_calculation_details: details,
                        include_zero_balances: false,
                    },
                );
                for run in layout.texts() {
                    if run.y >= footer_y {
                        assert!(
                            run.text.starts_with("Page ") || run.text.starts_with("Generated on "),
                            "{} accounts: '{}' at y={} overlaps the footer",
                            accounts,
                            run.text,
                            run.y
                        );
                    }
                }
                let totals = layout
                    .texts()
                    .filter(|t| t.text.starts_with("Final Balance: "))
                    .count();
                assert_eq!(totals, 1, "{} accounts", accounts);
            }
        }
    }

    #[test]
    fn test_render_produces_pdf_bytes() {
        let layout = build_trial_balance_layout(&data(2), &ReportHeader::default(), ExportOptions::default());
        let bytes = render_pdf(&layout, "Trial Balance Report").unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
