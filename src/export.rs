use crate::{
    api::Api,
    cli::{ExportFormat, ExportPlan},
    dashboard::{Dashboard, Status},
    data::Table,
    fetch::Fetch,
    render::render_page,
};
use anyhow::{Context, Result, bail};
use chrono::Utc;
use flate2::{Compression, write::GzEncoder};
use std::{fs::File, io::Write, path::Path};
use tracing::info;

/// Jalankan pipeline sekali (catalog -> dataset -> filter -> halaman) lalu tulis hasilnya.
pub async fn run_export<F: Fetch>(
    api: &Api<F>,
    dashboard: &mut Dashboard,
    plan: &ExportPlan,
    stylesheet: Option<String>,
) -> Result<()> {
    dashboard.set_query(&plan.query);
    dashboard.begin_catalog();
    if let Some(dataset) = dashboard.apply_catalog(api.catalog().await) {
        let token = dashboard.begin_load(&dataset);
        let (doc, fresh) = tokio::join!(api.dataset(&dataset), api.last_updated());
        dashboard.apply_dataset(token, doc);
        dashboard.apply_freshness(fresh.map(|l| l.updated_at));
    }

    if let Some(parent) = plan.path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }

    let failed = dashboard.status() == Status::Failed;
    match plan.format {
        ExportFormat::Html => {
            let total = dashboard.paginator().total();
            if !failed && plan.page > 0 && plan.page > total.max(1) {
                bail!("page {} is out of range (1..={})", plan.page, total.max(1));
            }
            dashboard.go_to_page(plan.page);
            let html = render_page(&dashboard.page_view(Utc::now(), plan.page == 0, stylesheet));
            std::fs::write(&plan.path, html)
                .with_context(|| format!("write {}", plan.path.display()))?;
        }
        ExportFormat::Csv | ExportFormat::CsvGz if !failed => {
            write_csv(
                &plan.path,
                dashboard.table(),
                dashboard.filtered(),
                plan.format == ExportFormat::CsvGz,
            )?;
        }
        ExportFormat::Csv | ExportFormat::CsvGz => {}
    }

    if failed {
        bail!("{}", crate::render::ERROR_BANNER);
    }
    info!(path = %plan.path.display(), rows = dashboard.filtered().len(), "export written");
    Ok(())
}

fn write_records<W: Write>(out: W, table: &Table, indices: &[usize]) -> Result<W> {
    let mut wtr = csv::WriterBuilder::new().flexible(true).from_writer(out);
    wtr.write_record(&table.headers)?;
    for row in indices.iter().filter_map(|&i| table.rows.get(i)) {
        wtr.write_record(row)?;
    }
    wtr.into_inner().map_err(|e| anyhow::anyhow!("flush csv: {}", e.error()))
}

/// Tulis header + baris terfilter sebagai CSV, dikompres gzip kalau diminta.
pub fn write_csv(path: &Path, table: &Table, indices: &[usize], gzip: bool) -> Result<()> {
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    if gzip {
        write_records(GzEncoder::new(file, Compression::default()), table, indices)?.finish()?;
    } else {
        write_records(file, table, indices)?;
    }
    Ok(())
}
