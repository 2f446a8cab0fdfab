use serde::Serialize;
use serde_json::{json, Value};
use storage_api_client::{
    client::{ExportTableOptions, WriteTableOptions},
    JobId, StorageClient,
};

use crate::args::Command;

pub async fn run(client: &StorageClient, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Job { id } => print_json(&client.get_job(JobId::new(id)).await?),
        Command::Jobs { limit } => print_json(&client.list_jobs(limit).await?),
        Command::Wait { ids } => print_json(&wait_all(client, &ids).await?),
        Command::Import {
            table,
            file_id,
            incremental,
            no_wait,
        } => {
            let options = WriteTableOptions::new(file_id).incremental(incremental);
            let job_id = client.write_table_async(&table, &options).await?;
            log::info!("import into {table} started as job {job_id}");
            finish(client, job_id, no_wait).await
        }
        Command::Export {
            table,
            gzip,
            no_wait,
        } => {
            let options = ExportTableOptions {
                gzip,
                ..ExportTableOptions::default()
            };
            let job_id = client.export_table_async(&table, &options).await?;
            log::info!("export of {table} started as job {job_id}");
            finish(client, job_id, no_wait).await
        }
    }
}

/// Result payloads of the given jobs, one array entry per id in input order.
async fn wait_all(client: &StorageClient, ids: &[u64]) -> anyhow::Result<Vec<Value>> {
    let ids: Vec<JobId> = ids.iter().copied().map(JobId::new).collect();
    Ok(client.handle_async_tasks(&ids).await?)
}

async fn finish(client: &StorageClient, job_id: JobId, no_wait: bool) -> anyhow::Result<()> {
    if no_wait {
        return print_json(&json!({ "id": job_id }));
    }
    let job = client.wait_for_job(job_id).await?;
    print_json(&job.into_results())
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use storage_api_client::ClientBuilder;

    use super::*;

    fn client_for(server: &mockito::Server) -> StorageClient {
        ClientBuilder::new()
            .url(server.url())
            .token("token")
            .retry_delay(|_| Duration::ZERO)
            .job_poll_delay(|_| Duration::ZERO)
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_wait_output_shape_does_not_depend_on_id_count() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/v2/storage/jobs/7")
            .with_status(200)
            .with_body(r#"{"id": 7, "status": "success", "results": {"importedRowsCount": 1}}"#)
            .create_async()
            .await;
        server
            .mock("GET", "/v2/storage/jobs/8")
            .with_status(200)
            .with_body(r#"{"id": 8, "status": "success", "results": {"importedRowsCount": 2}}"#)
            .create_async()
            .await;
        let client = client_for(&server);

        let single = wait_all(&client, &[7]).await.unwrap();
        let many = wait_all(&client, &[8, 7]).await.unwrap();

        assert_eq!(single, vec![json!({"importedRowsCount": 1})]);
        assert_eq!(
            many,
            vec![json!({"importedRowsCount": 2}), json!({"importedRowsCount": 1})]
        );
    }
}
