use super::*;

const PREAMBLE: &str = "账户报告\n账户: 示例店铺\n时间范围: 2024-01-01 至 2024-01-07\n币种: CNY\n生成时间: 2024-01-08\n\n";

// -----------------------------------------------------------------------
// header detection
// -----------------------------------------------------------------------

#[test]
fn header_found_below_metadata_preamble() {
    let text = format!(
        "{PREAMBLE}日期,计划,关键词,展现,点击,消费\n2024-01-01,品牌,蓝牙耳机,120,8,¥36.50\n"
    );
    let table = ingest_text(&text, IngestOptions::default()).unwrap();
    assert_eq!(table.header_line, 6);
    assert_eq!(
        table.columns,
        vec!["日期", "计划", "关键词", "展现", "点击", "消费"]
    );
    assert_eq!(table.rows.len(), 1);
}

#[test]
fn header_defaults_to_first_line() {
    let lines = ["name,value", "a,1", "b,2"];
    assert_eq!(detect_header_line(&lines), 0);
}

#[test]
fn single_keyword_line_is_not_a_header() {
    let lines = ["Report date: 2024-01-01", "Campaign,Clicks,Cost", "x,1,2"];
    assert_eq!(detect_header_line(&lines), 1);
}

#[test]
fn header_beyond_scan_window_is_ignored() {
    let mut lines = vec!["meta"; HEADER_SCAN_LINES];
    lines.push("Date,Campaign,Cost");
    assert_eq!(detect_header_line(&lines), 0);
}

#[test]
fn header_match_is_case_insensitive() {
    let lines = ["DATE,CAMPAIGN,SPEND"];
    assert_eq!(detect_header_line(&lines), 0);
    let lines = ["junk", "DATE,CAMPAIGN,SPEND"];
    assert_eq!(detect_header_line(&lines), 1);
}

// -----------------------------------------------------------------------
// delimiter
// -----------------------------------------------------------------------

#[test]
fn tab_header_selects_tab_delimiter() {
    let text = "Date\tCampaign\tCost\n2024-01-01\tSpring, Sale\t12\n";
    let table = ingest_text(text, IngestOptions::default()).unwrap();
    assert_eq!(table.delimiter, Delimiter::Tab);
    assert_eq!(table.rows[0].values[1], "Spring, Sale");
}

#[test]
fn forced_delimiter_overrides_detection() {
    let text = "Date;Cost\n2024;1\n";
    let options = IngestOptions {
        delimiter: Some(Delimiter::Comma),
    };
    let table = ingest_text(text, options).unwrap();
    assert_eq!(table.columns, vec!["Date;Cost"]);
}

// -----------------------------------------------------------------------
// row admission
// -----------------------------------------------------------------------

#[test]
fn zero_impression_rows_are_excluded() {
    let text = "日期,关键词,展现,点击\n2024-01-01,耳机,0,0\n2024-01-01,音箱,35,2\n";
    let table = ingest_text(text, IngestOptions::default()).unwrap();
    assert_eq!(table.rows.len(), 1);
    assert_eq!(table.rows[0].values[1], "音箱");
}

#[test]
fn quoted_zero_impressions_are_excluded() {
    let text = "Date,Keyword,Impressions\n2024-01-01,\"shoes\",\"0\"\n2024-01-02,boots,4\n";
    let table = ingest_text(text, IngestOptions::default()).unwrap();
    assert_eq!(table.rows.len(), 1);
    assert_eq!(table.rows[0].values[1], "boots");
}

#[test]
fn short_rows_are_skipped() {
    let text = "Date,Campaign,Keyword,Impressions,Clicks,Cost\n2024-01-01,A\n2024-01-01,A,k,10\n";
    let table = ingest_text(text, IngestOptions::default()).unwrap();
    assert_eq!(table.rows.len(), 1);
    // Missing trailing fields are padded.
    assert_eq!(table.rows[0].values.len(), 6);
    assert_eq!(table.rows[0].values[5], "");
}

#[test]
fn unbalanced_quote_only_drops_its_own_row() {
    let text = "Keyword,Impressions,Clicks,Cost\n\"shoes,100,5,10\nboots,300,9,20\nsandals,200,1,30\nhats,50,2,5\n";
    let table = ingest_text(text, IngestOptions::default()).unwrap();
    let keywords: Vec<&str> = table.rows.iter().map(|r| r.values[0].as_str()).collect();
    assert_eq!(keywords, vec!["boots", "sandals", "hats"]);
}

#[test]
fn delimiter_only_lines_are_ignored() {
    let text = "Keyword,Impressions\n,\nshoes,10\n";
    let table = ingest_text(text, IngestOptions::default()).unwrap();
    assert_eq!(table.rows.len(), 1);
}

#[test]
fn leading_blank_line_does_not_become_header() {
    let text = "\nname,value\na,1\n";
    let table = ingest_text(text, IngestOptions::default()).unwrap();
    assert_eq!(table.header_line, 1);
    assert_eq!(table.columns, vec!["name", "value"]);
}

#[test]
fn fields_are_trimmed_and_unquoted() {
    let text = "Date,Campaign\n  2024-01-01 ,  \"Brand\"  \n";
    let table = ingest_text(text, IngestOptions::default()).unwrap();
    assert_eq!(table.rows[0].values, vec!["2024-01-01", "Brand"]);
}

#[test]
fn quoted_field_keeps_embedded_delimiter() {
    let text = "Keyword,Cost\nshoes,\"¥1,200\"\n";
    let table = ingest_text(text, IngestOptions::default()).unwrap();
    assert_eq!(table.rows[0].values[1], "¥1,200");
}

#[test]
fn blank_lines_are_ignored() {
    let text = "Date,Cost\r\n\r\n2024-01-01,5\r\n\r\n";
    let table = ingest_text(text, IngestOptions::default()).unwrap();
    assert_eq!(table.rows.len(), 1);
}

// -----------------------------------------------------------------------
// failures
// -----------------------------------------------------------------------

#[test]
fn single_line_file_is_empty() {
    let err = ingest_text("Date,Cost\n", IngestOptions::default()).unwrap_err();
    assert!(matches!(err, IngestError::Empty));
}

#[test]
fn all_rows_rejected_is_no_rows() {
    let text = "Date,Impressions\n2024-01-01,0\n";
    let err = ingest_text(text, IngestOptions::default()).unwrap_err();
    assert!(matches!(err, IngestError::NoRows { header_line: 0 }));
}

// -----------------------------------------------------------------------
// bytes
// -----------------------------------------------------------------------

#[test]
fn gbk_upload_with_trailing_bad_byte_keeps_chinese_header() {
    let source = "日期,计划,关键词,展现,点击,消费\n2024-01-01,品牌推广,蓝牙耳机,100,5,12.5\n2024-01-02,品牌推广,降噪耳机,80,3,9.1\n";
    let (bytes, _, _) = encoding_rs::GBK.encode(source);
    let mut bytes = bytes.into_owned();
    bytes.push(0x81);

    let table = ingest(&bytes, IngestOptions::default()).unwrap();
    assert_eq!(table.encoding, "GBK");
    assert_eq!(table.columns[2], "关键词");
    assert_eq!(table.rows.len(), 2);
}

#[test]
fn gbk_upload_parses_with_chinese_header() {
    let source = format!("{PREAMBLE}日期,计划,关键词,展现,点击,消费\n2024-01-01,品牌,蓝牙耳机,120,8,36.5\n");
    let (bytes, _, _) = encoding_rs::GBK.encode(&source);
    let table = ingest(&bytes, IngestOptions::default()).unwrap();
    assert_eq!(table.encoding, "GBK");
    assert_eq!(table.header_line, 6);
    assert_eq!(table.rows[0].values[2], "蓝牙耳机");
}

#[test]
fn utf8_upload_reports_utf8() {
    let table = ingest(b"Date,Cost\n2024-01-01,5\n", IngestOptions::default()).unwrap();
    assert_eq!(table.encoding, "UTF-8");
}

#[test]
fn records_pair_columns_with_values() {
    let table = ingest_text("Date,Cost\n2024-01-01,5\n", IngestOptions::default()).unwrap();
    let records: Vec<_> = table.records().collect();
    assert_eq!(records[0], vec![("Date", "2024-01-01"), ("Cost", "5")]);
}
