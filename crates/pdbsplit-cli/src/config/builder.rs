use super::defaults::DefaultsConfig;
use super::file::FileConfig;
use super::models::{AppConfig, OutputSettings, SourceKind, SourceSettings, StatusConfig};
use crate::cli::{RunArgs, StatusArgs};
use crate::error::{CliError, Result};
use pdbsplit::engine::config::BatchConfigBuilder;
use std::path::PathBuf;
use std::str::FromStr;

pub fn build_config(args: &RunArgs) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();
    let file_config = FileConfig::load_optional(args.config.as_deref())?;
    let mut file_config = apply_set_values(file_config, &args.set_values)?;

    let batch_file = file_config.batch.take().unwrap_or_default();
    let source_file = file_config.source.take().unwrap_or_default();
    let output_file = file_config.output.take().unwrap_or_default();

    let batch = BatchConfigBuilder::new()
        .workers(
            args.workers
                .or(batch_file.workers)
                .unwrap_or(defaults.workers),
        )
        .extension(
            args.extension
                .clone()
                .or(batch_file.extension)
                .unwrap_or(defaults.extension),
        )
        .require_annotations(
            args.require_annotations
                || batch_file
                    .require_annotations
                    .unwrap_or(defaults.require_annotations),
        )
        .checkpoint_every(args.checkpoint_every.or(batch_file.checkpoint_every))
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    let source = SourceSettings {
        kind: args.source.or(source_file.kind).unwrap_or(defaults.source),
        tofasta_command: args
            .tofasta_command
            .clone()
            .or(source_file.tofasta_command)
            .unwrap_or(defaults.tofasta_command),
        selres_command: args
            .selres_command
            .clone()
            .or(source_file.selres_command)
            .unwrap_or(defaults.selres_command),
    };

    let output = OutputSettings {
        structured_table: args
            .structured_out
            .clone()
            .or(output_file.structured_table)
            .unwrap_or_else(|| PathBuf::from(&defaults.structured_table)),
        unstructured_table: args
            .unstructured_out
            .clone()
            .or(output_file.unstructured_table)
            .unwrap_or_else(|| PathBuf::from(&defaults.unstructured_table)),
        completion_log: args
            .completion_log
            .clone()
            .or(output_file.completion_log)
            .unwrap_or_else(|| PathBuf::from(&defaults.completion_log)),
        append: args.append || output_file.append.unwrap_or(defaults.append),
    };

    if output.structured_table == output.unstructured_table
        || output.structured_table == output.completion_log
        || output.unstructured_table == output.completion_log
    {
        return Err(CliError::Config(
            "Output tables and completion log must be distinct files.".to_string(),
        ));
    }

    // Rows written at a checkpoint must survive into the resumed run's tables.
    if batch.checkpoint_every.is_some() && !output.append {
        return Err(CliError::Config(
            "checkpoint-every requires append mode; a resumed run would otherwise overwrite the \
             rows of files already recorded as done."
                .to_string(),
        ));
    }

    Ok(AppConfig {
        input_dir: args.input.clone(),
        batch,
        source,
        output,
    })
}

pub fn build_status_config(args: &StatusArgs) -> Result<StatusConfig> {
    let defaults = DefaultsConfig::default();
    let file_config = FileConfig::load_optional(args.config.as_deref())?;
    let batch_file = file_config.batch.unwrap_or_default();
    let output_file = file_config.output.unwrap_or_default();

    let extension = args
        .extension
        .clone()
        .or(batch_file.extension)
        .unwrap_or(defaults.extension);

    Ok(StatusConfig {
        input_dir: args.input.clone(),
        extension: extension.trim().trim_start_matches('.').to_string(),
        completion_log: args
            .completion_log
            .clone()
            .or(output_file.completion_log)
            .unwrap_or_else(|| PathBuf::from(&defaults.completion_log)),
    })
}

fn parse_value<T: FromStr>(key: &str, value: &str, kind: &str) -> Result<T> {
    value.parse().map_err(|_| {
        CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value))
    })
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for kv_pair in set_values {
        let Some((key, value)) = kv_pair.split_once('=') else {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        };
        let key = key.trim();
        let value = value.trim();

        match key {
            "batch.workers" => {
                config.batch.get_or_insert_with(Default::default).workers =
                    Some(parse_value(key, value, "integer")?);
            }
            "batch.extension" => {
                config.batch.get_or_insert_with(Default::default).extension =
                    Some(value.to_string());
            }
            "batch.require-annotations" => {
                config
                    .batch
                    .get_or_insert_with(Default::default)
                    .require_annotations = Some(parse_value(key, value, "boolean")?);
            }
            "batch.checkpoint-every" => {
                config
                    .batch
                    .get_or_insert_with(Default::default)
                    .checkpoint_every = Some(parse_value(key, value, "integer")?);
            }
            "source.kind" => {
                let kind = match value {
                    "native" => SourceKind::Native,
                    "pdb-tools" => SourceKind::PdbTools,
                    _ => {
                        return Err(CliError::Config(format!(
                            "Invalid source kind: '{}'. Expected 'native' or 'pdb-tools'.",
                            value
                        )));
                    }
                };
                config.source.get_or_insert_with(Default::default).kind = Some(kind);
            }
            "source.tofasta-command" => {
                config
                    .source
                    .get_or_insert_with(Default::default)
                    .tofasta_command = Some(value.to_string());
            }
            "source.selres-command" => {
                config
                    .source
                    .get_or_insert_with(Default::default)
                    .selres_command = Some(value.to_string());
            }
            "output.structured-table" => {
                config
                    .output
                    .get_or_insert_with(Default::default)
                    .structured_table = Some(PathBuf::from(value));
            }
            "output.unstructured-table" => {
                config
                    .output
                    .get_or_insert_with(Default::default)
                    .unstructured_table = Some(PathBuf::from(value));
            }
            "output.completion-log" => {
                config
                    .output
                    .get_or_insert_with(Default::default)
                    .completion_log = Some(PathBuf::from(value));
            }
            "output.append" => {
                config.output.get_or_insert_with(Default::default).append =
                    Some(parse_value(key, value, "boolean")?);
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}
