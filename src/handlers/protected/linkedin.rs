// handlers/protected/linkedin.rs - LinkedIn job and company lookups

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::models::Job;
use crate::rpc::{Context, Contract, FieldKind, Procedure, RegistrationError, Router};
use crate::store::Store;

const DEFAULT_ROWS: usize = 10;

pub fn router() -> Result<Router, RegistrationError> {
    Router::builder()
        .procedure(
            "scrapeJobs",
            Procedure::protected()
                .input(
                    Contract::object()
                        .required("title", FieldKind::String)
                        .required("location", FieldKind::String)
                        .optional("rows", FieldKind::Integer),
                )
                .mutation(scrape_jobs),
        )
        .procedure(
            "scrapeCompany",
            Procedure::protected()
                .input(Contract::object().required("companyUrl", FieldKind::String))
                .mutation(scrape_company),
        )
        .procedure("getAccountInfo", Procedure::protected().query(get_account_info))
        .build()
}

#[derive(Debug, Deserialize)]
struct JobSearch {
    title: String,
    location: String,
    rows: Option<i64>,
}

#[derive(Debug, Serialize)]
struct ScrapedJobs {
    success: bool,
    jobs: Vec<Job>,
}

/// First `rows` jobs of the catalogue; zero or a missing value means the default page size
async fn scrape_jobs(ctx: Arc<Context>, input: JobSearch) -> anyhow::Result<ScrapedJobs> {
    let rows = match input.rows {
        Some(n) if n > 0 => n as usize,
        _ => DEFAULT_ROWS,
    };
    tracing::debug!(title = %input.title, location = %input.location, rows, "Scraping jobs");

    let jobs = ctx.state().jobs.list().await.into_iter().take(rows).collect();
    Ok(ScrapedJobs { success: true, jobs })
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CompanyRequest {
    company_url: String,
}

#[derive(Debug, Serialize)]
struct Company {
    name: &'static str,
    description: &'static str,
    industry: &'static str,
    size: &'static str,
    website: &'static str,
}

async fn scrape_company(_ctx: Arc<Context>, input: CompanyRequest) -> anyhow::Result<Company> {
    tracing::debug!(url = %input.company_url, "Scraping company");
    Ok(Company {
        name: "Tech Company",
        description: "A leading technology company",
        industry: "Technology",
        size: "1000-5000 employees",
        website: "https://techcompany.com",
    })
}

#[derive(Debug, Serialize)]
struct AccountInfo {
    configured: bool,
    credits: u32,
}

async fn get_account_info(_ctx: Arc<Context>, _: ()) -> anyhow::Result<AccountInfo> {
    Ok(AccountInfo {
        configured: true,
        credits: 1000,
    })
}
