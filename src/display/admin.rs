//! Display formatting for the master data entities

use tabled::Tabled;

use super::{or_dash, render_table, yes_no};
use crate::models::{Contact, Currency, ReportTemplate, TaxRate, Warehouse};

#[derive(Tabled)]
struct ContactRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Company")]
    company: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Outstanding")]
    outstanding: String,
    #[tabled(rename = "Active")]
    active: &'static str,
    #[tabled(rename = "ID")]
    id: String,
}

pub fn format_contact_list(contacts: &[Contact]) -> String {
    let rows = contacts
        .iter()
        .map(|c| ContactRow {
            name: c.name.clone(),
            company: c.company_name.clone(),
            kind: c.contact_type.to_string(),
            email: c.email.clone(),
            outstanding: c.outstanding_balance.format_grouped(),
            active: yes_no(c.is_active),
            id: c.id.clone(),
        })
        .collect();
    render_table(rows, "No contacts found.")
}

pub fn format_contact_details(contact: &Contact) -> String {
    let mut output = String::new();

    output.push_str(&format!("Contact: {}\n", contact.name));
    output.push_str(&format!("  ID:            {}\n", contact.id));
    output.push_str(&format!("  Company:       {}\n", or_dash(Some(&contact.company_name))));
    output.push_str(&format!("  Type:          {}\n", contact.contact_type));
    output.push_str(&format!("  Email:         {}\n", or_dash(Some(&contact.email))));
    output.push_str(&format!("  Phone:         {}\n", or_dash(contact.phone.as_deref())));
    output.push_str(&format!("  Mobile:        {}\n", or_dash(contact.mobile.as_deref())));
    output.push_str(&format!("  Website:       {}\n", or_dash(contact.website.as_deref())));
    output.push_str(&format!("  Tax Number:    {}\n", or_dash(contact.tax_number.as_deref())));
    output.push_str(&format!(
        "  Credit Limit:  {}\n",
        contact.credit_limit.format_grouped()
    ));
    output.push_str(&format!("  Payment Terms: {} days\n", contact.payment_terms));
    output.push_str(&format!(
        "  Outstanding:   {}\n",
        contact.outstanding_balance.format_grouped()
    ));
    output.push_str(&format!("  Active:        {}\n", yes_no(contact.is_active)));

    output
}

#[derive(Tabled)]
struct WarehouseRow {
    #[tabled(rename = "Code")]
    code: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "City")]
    city: String,
    #[tabled(rename = "Manager")]
    manager: String,
    #[tabled(rename = "Active")]
    active: &'static str,
    #[tabled(rename = "ID")]
    id: String,
}

pub fn format_warehouse_list(warehouses: &[Warehouse]) -> String {
    let rows = warehouses
        .iter()
        .map(|w| WarehouseRow {
            code: w.warehouse_code.clone(),
            name: w.warehouse_name.clone(),
            city: or_dash(w.city.as_deref()),
            manager: or_dash(w.manager_name.as_deref()),
            active: yes_no(w.is_active),
            id: w.id.clone(),
        })
        .collect();
    render_table(rows, "No warehouses found.")
}

pub fn format_warehouse_details(warehouse: &Warehouse) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Warehouse: {} ({})\n",
        warehouse.warehouse_name, warehouse.warehouse_code
    ));
    output.push_str(&format!("  ID:          {}\n", warehouse.id));
    output.push_str(&format!("  Address:     {}\n", or_dash(warehouse.address.as_deref())));

    let location: Vec<&str> = [&warehouse.city, &warehouse.state, &warehouse.postal_code, &warehouse.country]
        .into_iter()
        .filter_map(|part| part.as_deref())
        .filter(|part| !part.trim().is_empty())
        .collect();
    if !location.is_empty() {
        output.push_str(&format!("  Location:    {}\n", location.join(", ")));
    }

    output.push_str(&format!("  Phone:       {}\n", or_dash(warehouse.phone.as_deref())));
    output.push_str(&format!("  Email:       {}\n", or_dash(warehouse.email.as_deref())));
    output.push_str(&format!("  Manager:     {}\n", or_dash(warehouse.manager_name.as_deref())));
    output.push_str(&format!("  Active:      {}\n", yes_no(warehouse.is_active)));
    if let Some(description) = warehouse.description.as_deref().filter(|d| !d.is_empty()) {
        output.push_str(&format!("  Description: {}\n", description));
    }

    output
}

#[derive(Tabled)]
struct CurrencyRow {
    #[tabled(rename = "Code")]
    code: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Symbol")]
    symbol: String,
    #[tabled(rename = "Base")]
    base: &'static str,
    #[tabled(rename = "Active")]
    active: &'static str,
    #[tabled(rename = "ID")]
    id: String,
}

pub fn format_currency_list(currencies: &[Currency]) -> String {
    let rows = currencies
        .iter()
        .map(|c| CurrencyRow {
            code: c.currency_code.clone(),
            name: c.currency_name.clone(),
            symbol: c.symbol.clone(),
            base: yes_no(c.is_base_currency),
            active: yes_no(c.is_active),
            id: c.id.clone(),
        })
        .collect();
    render_table(rows, "No currencies found.")
}

#[derive(Tabled)]
struct TaxRateRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Rate")]
    rate: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Effective")]
    effective: String,
    #[tabled(rename = "Active")]
    active: &'static str,
    #[tabled(rename = "ID")]
    id: String,
}

pub fn format_tax_rate_list(rates: &[TaxRate]) -> String {
    let rows = rates
        .iter()
        .map(|r| TaxRateRow {
            name: r.tax_name.clone(),
            rate: format!("{:.2}%", r.tax_percentage),
            kind: or_dash(Some(&r.tax_type)),
            effective: match r.effective_to {
                Some(to) => format!(
                    "{} to {}",
                    r.effective_from.format("%Y-%m-%d"),
                    to.format("%Y-%m-%d")
                ),
                None => format!("from {}", r.effective_from.format("%Y-%m-%d")),
            },
            active: yes_no(r.is_active),
            id: r.id.clone(),
        })
        .collect();
    render_table(rows, "No tax rates found.")
}

#[derive(Tabled)]
struct TemplateRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Report Type")]
    report_type: String,
    #[tabled(rename = "System")]
    system: &'static str,
    #[tabled(rename = "Active")]
    active: &'static str,
    #[tabled(rename = "ID")]
    id: String,
}

pub fn format_template_list(templates: &[ReportTemplate]) -> String {
    let rows = templates
        .iter()
        .map(|t| TemplateRow {
            name: t.template_name.clone(),
            report_type: t.report_type.clone(),
            system: yes_no(t.is_system),
            active: yes_no(t.is_active),
            id: t.id.clone(),
        })
        .collect();
    render_table(rows, "No report templates found.")
}

pub fn format_template_details(template: &ReportTemplate) -> String {
    let mut output = String::new();

    output.push_str(&format!("Report Template: {}\n", template.template_name));
    output.push_str(&format!("  ID:          {}\n", template.id));
    output.push_str(&format!("  Report Type: {}\n", template.report_type));
    output.push_str(&format!(
        "  Description: {}\n",
        or_dash(template.description.as_deref())
    ));
    output.push_str(&format!("  System:      {}\n", yes_no(template.is_system)));
    output.push_str(&format!("  Active:      {}\n", yes_no(template.is_active)));
    output.push_str(&format!(
        "  Created by:  {}\n",
        template.created_by_name.as_deref().unwrap_or(&template.created_by)
    ));
    if let Some(parameters) = template.parameters.as_deref().filter(|p| !p.is_empty()) {
        output.push_str(&format!("  Parameters:  {}\n", parameters));
    }
    output.push('\n');
    output.push_str(&template.template_content);
    output.push('\n');

    output
}
