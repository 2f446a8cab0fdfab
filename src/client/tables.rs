use serde::Serialize;
use serde_json::Value;

use crate::{error::StorageError, jobs::JobId};

use super::api::StorageClient;

fn is_false(value: &bool) -> bool {
    !*value
}

/// Parameters of an asynchronous import of an uploaded file into a table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WriteTableOptions {
    /// Id of the uploaded CSV file
    pub data_file_id: u64,
    #[serde(skip_serializing_if = "is_false")]
    pub incremental: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delimiter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enclosure: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub escaped_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<String>>,
    #[serde(skip_serializing_if = "is_false")]
    pub without_headers: bool,
}

impl WriteTableOptions {
    pub fn new(data_file_id: u64) -> Self {
        Self {
            data_file_id,
            ..Self::default()
        }
    }

    pub fn incremental(mut self, incremental: bool) -> Self {
        self.incremental = incremental;
        self
    }
}

/// Parameters of an asynchronous table export.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportTableOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changed_since: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub where_column: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub where_values: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub where_operator: Option<String>,
    #[serde(skip_serializing_if = "is_false")]
    pub gzip: bool,
}

impl StorageClient {
    /// Table detail, including `rowsCount`.
    pub async fn get_table(&self, table_id: &str) -> Result<Value, StorageError> {
        self.api_get(&format!("tables/{table_id}")).await
    }

    /// Starts importing an uploaded file into `table_id`.
    pub async fn write_table_async(
        &self,
        table_id: &str,
        options: &WriteTableOptions,
    ) -> Result<JobId, StorageError> {
        self.api_post_async(
            &format!("tables/{table_id}/import-async"),
            serde_json::to_value(options)?,
        )
        .await
    }

    /// Imports an uploaded file into `table_id` and waits for the job's results.
    pub async fn write_table(
        &self,
        table_id: &str,
        options: &WriteTableOptions,
    ) -> Result<Value, StorageError> {
        let job_id = self.write_table_async(table_id, options).await?;
        self.poller.wait_for_job_result(job_id).await
    }

    /// Starts exporting `table_id` to a file.
    pub async fn export_table_async(
        &self,
        table_id: &str,
        options: &ExportTableOptions,
    ) -> Result<JobId, StorageError> {
        self.api_post_async(
            &format!("tables/{table_id}/export-async"),
            serde_json::to_value(options)?,
        )
        .await
    }
}
