//! Excel export functionality

use hos_domain::model::{DutyStatus, TripLogs};
use hos_domain::service::format_hours;
use hos_types::{Error, Result};
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use std::path::Path;

fn excel_err(e: XlsxError) -> Error {
    Error::Excel(e.to_string())
}

/// Export generated logs to an Excel file
pub fn export_to_excel(logs: &TripLogs, output_path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();

    let summary_sheet = workbook.add_worksheet();
    write_summary_sheet(summary_sheet, logs)?;

    let days_sheet = workbook.add_worksheet();
    write_days_sheet(days_sheet, logs)?;

    let grid_sheet = workbook.add_worksheet();
    write_grid_sheet(grid_sheet, logs)?;

    workbook.save(output_path).map_err(excel_err)?;

    Ok(())
}

fn write_summary_sheet(sheet: &mut Worksheet, logs: &TripLogs) -> Result<()> {
    sheet.set_name("Summary").map_err(excel_err)?;

    let header_format = Format::new().set_bold();
    let summary = &logs.summary;

    sheet
        .write_string_with_format(0, 0, "Driver's Daily Log Summary", &header_format)
        .map_err(excel_err)?;

    let mut row = 2;
    if let Some(first) = logs.trip_logs.first() {
        for (label, value) in [
            ("From:", first.from_location.as_str()),
            ("To:", first.to_location.as_str()),
            ("Truck:", first.truck_or_tractor_trailer_numbers.as_str()),
            ("Carrier:", first.carrier_name.as_str()),
        ] {
            sheet.write_string(row, 0, label).map_err(excel_err)?;
            sheet.write_string(row, 1, value).map_err(excel_err)?;
            row += 1;
        }
        row += 1;
    }

    for (label, value) in [
        ("Days:", summary.days as f64),
        ("Driving Hours:", summary.total_driving_hours),
        ("On Duty Hours:", summary.total_on_duty_hours),
        ("Miles:", summary.total_miles),
        ("Cycle Limit:", summary.cycle_limit_hours),
        ("Cycle Used (start):", summary.cycle_used_start),
        ("Cycle Used (end):", summary.cycle_used_end),
        ("Undriven Hours:", summary.remaining_driving_hours),
    ] {
        sheet.write_string(row, 0, label).map_err(excel_err)?;
        sheet.write_number(row, 1, value).map_err(excel_err)?;
        row += 1;
    }

    sheet.write_string(row, 0, "Outcome:").map_err(excel_err)?;
    sheet
        .write_string(row, 1, summary.outcome.label())
        .map_err(excel_err)?;

    sheet.set_column_width(0, 22).map_err(excel_err)?;
    sheet.set_column_width(1, 40).map_err(excel_err)?;

    Ok(())
}

fn write_days_sheet(sheet: &mut Worksheet, logs: &TripLogs) -> Result<()> {
    sheet.set_name("Daily Logs").map_err(excel_err)?;

    let header_format = Format::new().set_bold();

    let headers = [
        "Date",
        "Driving (h)",
        "On Duty (h)",
        "Off Duty (h)",
        "Sleeper (h)",
        "Miles Driving",
        "Total Mileage",
        "From",
        "To",
        "Truck / Trailer",
        "Carrier",
        "Manifest No.",
        "Commodity",
        "Remarks",
    ];

    for (col, header) in headers.iter().enumerate() {
        sheet
            .write_string_with_format(0, col as u16, *header, &header_format)
            .map_err(excel_err)?;
    }

    for (row_idx, log) in logs.trip_logs.iter().enumerate() {
        let row = (row_idx + 1) as u32;

        sheet
            .write_string(row, 0, log.date.format("%Y-%m-%d").to_string())
            .map_err(excel_err)?;

        let numbers = [
            log.driving_hours,
            log.on_duty_hours,
            log.off_duty_hours,
            log.sleeper_hours,
            log.total_miles_driving_today,
            log.total_mileage_today,
        ];
        for (offset, value) in numbers.iter().enumerate() {
            sheet
                .write_number(row, 1 + offset as u16, *value)
                .map_err(excel_err)?;
        }

        let texts = [
            log.from_location.as_str(),
            log.to_location.as_str(),
            log.truck_or_tractor_trailer_numbers.as_str(),
            log.carrier_name.as_str(),
            log.shipping_documents.dvl_or_manifest_no.as_str(),
            log.shipping_documents.shipper_commodity.as_str(),
        ];
        for (offset, value) in texts.iter().enumerate() {
            sheet
                .write_string(row, 7 + offset as u16, *value)
                .map_err(excel_err)?;
        }

        sheet
            .write_string(row, 13, log.remarks.join("; "))
            .map_err(excel_err)?;
    }

    sheet.set_column_width(0, 12).map_err(excel_err)?;
    for col in 7..=8 {
        sheet.set_column_width(col, 30).map_err(excel_err)?;
    }
    sheet.set_column_width(13, 80).map_err(excel_err)?;

    Ok(())
}

fn write_grid_sheet(sheet: &mut Worksheet, logs: &TripLogs) -> Result<()> {
    sheet.set_name("Grid").map_err(excel_err)?;

    let header_format = Format::new().set_bold();

    sheet
        .write_string_with_format(0, 0, "Date", &header_format)
        .map_err(excel_err)?;
    for hour in 0..24u16 {
        sheet
            .write_string_with_format(0, 1 + hour, format!("{:02}", hour), &header_format)
            .map_err(excel_err)?;
        sheet.set_column_width(1 + hour, 4).map_err(excel_err)?;
    }
    sheet
        .write_string_with_format(0, 25, "Hours (D/O/Off/S)", &header_format)
        .map_err(excel_err)?;

    for (row_idx, log) in logs.trip_logs.iter().enumerate() {
        let row = (row_idx + 1) as u32;
        sheet
            .write_string(row, 0, log.date.format("%Y-%m-%d").to_string())
            .map_err(excel_err)?;
        for cell in &log.log_data {
            sheet
                .write_string(row, 1 + u16::from(cell.hour), cell.status.symbol().to_string())
                .map_err(excel_err)?;
        }
        let totals = format!(
            "{} / {} / {} / {}",
            format_hours(log.driving_hours),
            format_hours(log.on_duty_hours),
            format_hours(log.off_duty_hours),
            format_hours(log.sleeper_hours)
        );
        sheet.write_string(row, 25, totals).map_err(excel_err)?;
    }

    let legend_row = (logs.trip_logs.len() + 2) as u32;
    sheet
        .write_string_with_format(legend_row, 0, "Legend", &header_format)
        .map_err(excel_err)?;
    for (offset, status) in DutyStatus::ALL.iter().enumerate() {
        let row = legend_row + 1 + offset as u32;
        sheet
            .write_string(row, 0, status.symbol().to_string())
            .map_err(excel_err)?;
        sheet.write_string(row, 1, status.label()).map_err(excel_err)?;
    }

    sheet.set_column_width(0, 12).map_err(excel_err)?;
    sheet.set_column_width(25, 20).map_err(excel_err)?;

    Ok(())
}
