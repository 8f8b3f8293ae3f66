//! End-to-end tests for the table command: input file to written CSV.

use cali_transform::commands::{execute_table, validate_table_args, TableArgs};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn table_args(input: &Path, outdir: &Path) -> TableArgs {
    TableArgs {
        input: input.to_path_buf(),
        outdir: outdir.to_path_buf(),
        skip_rows: 0,
        annotations: None,
    }
}

#[test]
fn test_csv_to_long_table() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("metrics.csv");
    fs::write(&input, "metric,a,b\nm1,1,2\nm2,,4\n").unwrap();

    let args = table_args(&input, &dir.path().join("tables"));
    validate_table_args(&args).unwrap();
    let outfile = execute_table(&args).unwrap();

    assert_eq!(outfile.file_name().unwrap(), "metrics.csv.transformed.csv");
    let written = fs::read_to_string(&outfile).unwrap();
    let source = input.display();
    let expected = format!(
        "path,annotation,dim1,dim2,value\n\
         {source},,m1,a,1\n\
         {source},,m1,b,2\n\
         {source},,m2,b,4\n"
    );
    assert_eq!(written, expected);
}

#[test]
fn test_tsv_separator_by_extension() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("metrics.tsv");
    fs::write(&input, "metric\ta\nm1\t9\n").unwrap();

    let outfile = execute_table(&table_args(&input, &dir.path().join("tables"))).unwrap();
    let written = fs::read_to_string(&outfile).unwrap();
    assert!(written.ends_with(",m1,a,9\n"));
}

#[test]
fn test_skip_rows_and_annotations() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("metrics.csv");
    fs::write(&input, "generated by tool v2\nmetric,a\nm1,5\n").unwrap();

    let mut args = table_args(&input, &dir.path().join("tables"));
    args.skip_rows = 1;
    args.annotations = Some("run1|run2".to_string());

    let outfile = execute_table(&args).unwrap();
    let written = fs::read_to_string(&outfile).unwrap();
    assert!(written.contains(",run1|run2,m1,a,5\n"));
}

#[test]
fn test_table_mode_is_idempotent() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("metrics.csv");
    fs::write(&input, "metric,a,b\nm1,1,2\nm2,3,\n").unwrap();

    let args = table_args(&input, &dir.path().join("tables"));
    let outfile = execute_table(&args).unwrap();
    let first = fs::read(&outfile).unwrap();
    let outfile = execute_table(&args).unwrap();
    let second = fs::read(&outfile).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_trace_to_long_table() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("run.cali");
    fs::write(
        &input,
        "__rec=attr,name=sum#time.duration,attribute.alias=time\n\
         path=f,path=g,annotation=x,sum#time.duration=5\n",
    )
    .unwrap();

    let outfile = execute_table(&table_args(&input, &dir.path().join("tables"))).unwrap();
    let written = fs::read_to_string(&outfile).unwrap();
    assert_eq!(written, "path,annotation,dim1,dim2,value\nf/g,x,time,,5\n");
}

#[test]
fn test_trace_record_without_path_uses_unknown() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("run.cali");
    fs::write(&input, "elapsed=12\n").unwrap();

    let outfile = execute_table(&table_args(&input, &dir.path().join("tables"))).unwrap();
    let written = fs::read_to_string(&outfile).unwrap();
    assert_eq!(written, "path,annotation,dim1,dim2,value\nUNKNOWN,,elapsed,,12\n");
}

#[test]
fn test_unsupported_extension_fails_before_output() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("metrics.xlsx");
    fs::write(&input, "metric,a\nm1,1\n").unwrap();
    let outdir = dir.path().join("tables");

    let args = table_args(&input, &outdir);
    assert!(validate_table_args(&args).is_err());
    assert!(execute_table(&args).is_err());
    // Fatal before any row is read: nothing may be written.
    assert!(!outdir.exists());
}
