//! Row → series reshaping for the three file layouts the simulation writes,
//! plus the type-table side file.
//!
//! * ragged   – `key;_;n;s1;…;sn`, one group per row
//! * columnar – one step per row, one column per group, optionally preceded
//!   by header rows carrying labels and/or per-group caps

use std::path::Path;

use crate::core::{
    color::SeriesColor,
    constants::FIELD_DELIMITER,
    data::{SampleKind, parse_count, parse_f64, parse_i64, parse_sample},
    error::{FormatError, FormatErrorKind, PlotError},
    table::{Row, TableReader},
};

/// Offsets inside a ragged row.
const RAGGED_KEY: usize = 0;
const RAGGED_COUNT: usize = 2;
const RAGGED_FIRST_SAMPLE: usize = 3;

/// One group per row; `groups[i]` is the key of `series[i]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RaggedSeries {
    pub groups: Vec<i64>,
    pub series: Vec<Vec<f64>>,
}

impl RaggedSeries {
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// `(key, samples)` pairs in file order.
    pub fn iter(&self) -> impl Iterator<Item = (i64, &[f64])> {
        self.groups
            .iter()
            .copied()
            .zip(self.series.iter().map(Vec::as_slice))
    }
}

/// Shape of a columnar file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnLayout {
    /// `x;g0;g1;…` on every row, no header.
    TimeSeries { groups: usize },
    /// Row 0 holds one cap per group, later rows one value per group.
    Capped { groups: usize },
    /// Row 0 holds group labels, row 1 the caps, then capped data rows.
    LabelledCapped,
}

/// Per-group columns.  `x` is filled for [`ColumnLayout::TimeSeries`],
/// `labels` for [`ColumnLayout::LabelledCapped`], `caps` for both capped
/// layouts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnarSeries {
    pub x: Option<Vec<f64>>,
    pub labels: Option<Vec<String>>,
    pub caps: Option<Vec<usize>>,
    pub series: Vec<Vec<f64>>,
}

impl ColumnarSeries {
    #[inline]
    #[must_use]
    pub fn group_count(&self) -> usize {
        self.series.len()
    }
}

/// Reshape `key;_;n;samples…` rows.  Trailing fields past the declared
/// count are ignored.
pub fn reshape_ragged<I>(rows: I) -> Result<RaggedSeries, PlotError>
where
    I: IntoIterator<Item = Result<Row, PlotError>>,
{
    let mut out = RaggedSeries::default();
    for row in rows {
        let row = row?;
        let key = parse_i64(row.field(RAGGED_KEY)?, row.line, "group")?;
        row.require(RAGGED_FIRST_SAMPLE)?;
        let count = parse_count(row.field(RAGGED_COUNT)?, row.line, "sample count")?;

        let available = row.len() - RAGGED_FIRST_SAMPLE;
        if count > available {
            return Err(FormatError::at(
                row.line,
                FormatErrorKind::CountExceedsFields {
                    declared: count,
                    available,
                },
            )
            .into());
        }

        let samples = row.fields[RAGGED_FIRST_SAMPLE..RAGGED_FIRST_SAMPLE + count]
            .iter()
            .map(|f| parse_f64(f, row.line, "sample"))
            .collect::<Result<Vec<_>, _>>()?;

        out.groups.push(key);
        out.series.push(samples);
    }
    if out.is_empty() {
        return Err(FormatError::at(0, FormatErrorKind::EmptyInput).into());
    }
    Ok(out)
}

/// Reshape one-step-per-row files according to `layout`.
pub fn reshape_columnar<I>(
    rows: I,
    layout: ColumnLayout,
    kind: SampleKind,
) -> Result<ColumnarSeries, PlotError>
where
    I: IntoIterator<Item = Result<Row, PlotError>>,
{
    let mut rows = rows.into_iter();
    let mut out = ColumnarSeries::default();

    // --- header rows ---
    let groups = match layout {
        ColumnLayout::TimeSeries { groups } => {
            out.x = Some(Vec::new());
            groups
        }
        ColumnLayout::Capped { groups } => {
            let header = next_header(&mut rows)?;
            out.caps = Some(read_caps(&header, groups)?);
            groups
        }
        ColumnLayout::LabelledCapped => {
            let header = next_header(&mut rows)?;
            let labels = read_labels(&header);
            let groups = labels.len();
            if groups == 0 {
                return Err(FormatError::at(
                    header.line,
                    FormatErrorKind::HeaderMismatch {
                        what: "group labels",
                        expected: 1,
                        got: 0,
                    },
                )
                .into());
            }
            let caps_row = next_header(&mut rows)?;
            out.caps = Some(read_caps(&caps_row, groups)?);
            out.labels = Some(labels);
            groups
        }
    };
    out.series = vec![Vec::new(); groups];

    // --- data rows ---
    let mut data_rows = 0usize;
    for row in rows {
        let row = row?;
        if let Some(x) = out.x.as_mut() {
            row.require(groups + 1)?;
            x.push(parse_f64(&row.fields[0], row.line, "x")?);
            for (g, series) in out.series.iter_mut().enumerate() {
                series.push(parse_sample(&row.fields[g + 1], kind, row.line, "sample")?);
            }
        } else if let Some(caps) = &out.caps {
            row.require(groups)?;
            for (g, series) in out.series.iter_mut().enumerate() {
                if data_rows < caps[g] {
                    series.push(parse_sample(&row.fields[g], kind, row.line, "sample")?);
                }
            }
        }
        data_rows += 1;
    }

    if data_rows == 0 {
        match &out.caps {
            None => return Err(FormatError::at(0, FormatErrorKind::EmptyInput).into()),
            // A header whose caps are all zero is a complete, empty file.
            Some(caps) => {
                let expected = caps.iter().copied().max().unwrap_or(0);
                if expected > 0 {
                    return Err(FormatError::at(
                        0,
                        FormatErrorKind::HeaderMismatch {
                            what: "data rows",
                            expected,
                            got: 0,
                        },
                    )
                    .into());
                }
            }
        }
    }
    Ok(out)
}

fn next_header<I>(rows: &mut I) -> Result<Row, PlotError>
where
    I: Iterator<Item = Result<Row, PlotError>>,
{
    rows.next()
        .unwrap_or_else(|| Err(FormatError::at(0, FormatErrorKind::EmptyInput).into()))
}

fn read_caps(row: &Row, groups: usize) -> Result<Vec<usize>, FormatError> {
    row.require(groups)?;
    row.fields[..groups]
        .iter()
        .map(|f| parse_count(f, row.line, "row cap"))
        .collect()
}

/// Labels up to the last non-empty field (the writer ends rows with `;`).
fn read_labels(row: &Row) -> Vec<String> {
    let used = row
        .fields
        .iter()
        .rposition(|f| !f.trim().is_empty())
        .map_or(0, |p| p + 1);
    row.fields[..used].to_vec()
}

// --- Type table ---

/// Which side-file shape to expect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypeTableShape {
    /// `<color>;<label>` per line.
    ColorLabel,
    /// `<label>` per line.
    LabelOnly,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeEntry {
    pub color: Option<SeriesColor>,
    pub label: String,
}

/// Group-position lookup of colours and labels; row order is group order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeTable {
    entries: Vec<TypeEntry>,
}

impl TypeTable {
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn get(&self, group: usize) -> Option<&TypeEntry> {
        self.entries.get(group)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TypeEntry> {
        self.entries.iter()
    }

    /// Explicit colour of `group`, else the default cycle colour.
    #[must_use]
    pub fn color_or_cycle(&self, group: usize) -> SeriesColor {
        self.get(group)
            .and_then(|e| e.color)
            .unwrap_or_else(|| SeriesColor::cycle(group))
    }

    /// Fail unless the table covers `groups` groups.
    pub fn require(&self, groups: usize) -> Result<(), FormatError> {
        if self.entries.len() < groups {
            return Err(FormatError::at(
                0,
                FormatErrorKind::HeaderMismatch {
                    what: "type table rows",
                    expected: groups,
                    got: self.entries.len(),
                },
            ));
        }
        Ok(())
    }
}

/// Build a type table from already-split rows.
pub fn type_table_from_rows<I>(rows: I, shape: TypeTableShape) -> Result<TypeTable, PlotError>
where
    I: IntoIterator<Item = Result<Row, PlotError>>,
{
    let mut entries = Vec::new();
    for row in rows {
        let row = row?;
        let entry = match shape {
            TypeTableShape::ColorLabel => TypeEntry {
                color: Some(SeriesColor::from_name(row.field(0)?)?),
                label: row.field(1)?.to_owned(),
            },
            TypeTableShape::LabelOnly => TypeEntry {
                color: None,
                label: row.field(0)?.to_owned(),
            },
        };
        entries.push(entry);
    }
    Ok(TypeTable { entries })
}

/// Load the side file at `path`.
pub fn load_type_table(
    path: impl AsRef<Path>,
    shape: TypeTableShape,
) -> Result<TypeTable, PlotError> {
    type_table_from_rows(TableReader::open(path, FIELD_DELIMITER)?, shape)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(text: &str) -> TableReader<&[u8]> {
        TableReader::new(text.as_bytes(), FIELD_DELIMITER)
    }

    fn format_kind(err: PlotError) -> FormatErrorKind {
        match err {
            PlotError::Format(e) => e.kind,
            other => panic!("expected format error, got {other:?}"),
        }
    }

    #[test]
    fn ragged_round_trip() {
        let r = reshape_ragged(rows("2;_;3;5.0;7.0;9.0\n4;_;2;1.0;2.0\n")).unwrap();
        assert_eq!(r.groups, [2, 4]);
        assert_eq!(r.series, [vec![5.0, 7.0, 9.0], vec![1.0, 2.0]]);
    }

    #[test]
    fn ragged_ignores_extra_trailing_fields() {
        let r = reshape_ragged(rows("8;;2;10;20;30;junk;\n")).unwrap();
        assert_eq!(r.series[0], [10.0, 20.0]);
    }

    #[test]
    fn ragged_zero_count_is_an_empty_group() {
        let r = reshape_ragged(rows("8;;0;\n")).unwrap();
        assert_eq!(r.groups, [8]);
        assert!(r.series[0].is_empty());
    }

    #[test]
    fn ragged_count_beyond_fields_fails() {
        let err = reshape_ragged(rows("1;;2;5.0;6.0\n3;;4;1.0\n")).unwrap_err();
        assert_eq!(
            format_kind(err),
            FormatErrorKind::CountExceedsFields {
                declared: 4,
                available: 1
            }
        );
    }

    #[test]
    fn ragged_short_row_fails() {
        let err = reshape_ragged(rows("1;\n")).unwrap_err();
        assert!(matches!(
            format_kind(err),
            FormatErrorKind::MissingField { needed: 3, got: 2 }
        ));
    }

    #[test]
    fn ragged_bad_sample_fails() {
        let err = reshape_ragged(rows("1;;2;5.0;x\n")).unwrap_err();
        assert!(matches!(
            format_kind(err),
            FormatErrorKind::BadNumber { field: "sample", .. }
        ));
    }

    #[test]
    fn ragged_empty_file_fails() {
        let err = reshape_ragged(rows("")).unwrap_err();
        assert_eq!(format_kind(err), FormatErrorKind::EmptyInput);
    }

    #[test]
    fn time_series_aligns_groups_with_x() {
        let c = reshape_columnar(
            rows("0;1;10;100\n0.5;2;20;200\n1;3;30;300\n"),
            ColumnLayout::TimeSeries { groups: 3 },
            SampleKind::Float,
        )
        .unwrap();
        let x = c.x.as_ref().unwrap();
        assert_eq!(x, &[0.0, 0.5, 1.0]);
        assert_eq!(c.group_count(), 3);
        for s in &c.series {
            assert_eq!(s.len(), x.len());
        }
        assert_eq!(c.series[2], [100.0, 200.0, 300.0]);
    }

    #[test]
    fn time_series_short_row_fails() {
        let err = reshape_columnar(
            rows("0;1;10\n"),
            ColumnLayout::TimeSeries { groups: 3 },
            SampleKind::Float,
        )
        .unwrap_err();
        assert_eq!(
            format_kind(err),
            FormatErrorKind::MissingField { needed: 4, got: 3 }
        );
    }

    #[test]
    fn capped_groups_stop_at_their_cap() {
        let c = reshape_columnar(
            rows("3;0;1\n-1.5;;-2\n-2.5;;\n-3.5;;\n"),
            ColumnLayout::Capped { groups: 3 },
            SampleKind::Float,
        )
        .unwrap();
        assert_eq!(c.caps.as_deref(), Some(&[3, 0, 1][..]));
        assert_eq!(c.series[0], [-1.5, -2.5, -3.5]);
        assert!(c.series[1].is_empty());
        assert_eq!(c.series[2], [-2.0]);
    }

    #[test]
    fn capped_value_within_cap_must_parse() {
        let err = reshape_columnar(
            rows("2;2\n1;1\n1;\n"),
            ColumnLayout::Capped { groups: 2 },
            SampleKind::Float,
        )
        .unwrap_err();
        assert!(matches!(format_kind(err), FormatErrorKind::BadNumber { .. }));
    }

    #[test]
    fn labelled_caps_take_group_count_from_labels() {
        let c = reshape_columnar(
            rows("pause;play;fast forward;\n1;3;2;\n30;60;120;\n;61;118;\n;59;;\n"),
            ColumnLayout::LabelledCapped,
            SampleKind::Integer,
        )
        .unwrap();
        assert_eq!(
            c.labels.as_deref().unwrap(),
            ["pause", "play", "fast forward"]
        );
        assert_eq!(c.series[0], [30.0]);
        assert_eq!(c.series[1], [60.0, 61.0, 59.0]);
        assert_eq!(c.series[2], [120.0, 118.0]);
    }

    #[test]
    fn labelled_caps_need_a_cap_per_label() {
        let err = reshape_columnar(
            rows("a;b;c\n1;2\n5;5;5\n"),
            ColumnLayout::LabelledCapped,
            SampleKind::Integer,
        )
        .unwrap_err();
        assert_eq!(
            format_kind(err),
            FormatErrorKind::MissingField { needed: 3, got: 2 }
        );
    }

    #[test]
    fn columnar_without_data_rows_fails() {
        for (text, layout) in [
            ("", ColumnLayout::TimeSeries { groups: 2 }),
            ("", ColumnLayout::Capped { groups: 2 }),
            ("", ColumnLayout::LabelledCapped),
        ] {
            let err = reshape_columnar(rows(text), layout, SampleKind::Float).unwrap_err();
            assert_eq!(format_kind(err), FormatErrorKind::EmptyInput, "{layout:?}");
        }
    }

    #[test]
    fn capped_header_promising_rows_needs_them() {
        let err = reshape_columnar(
            rows("3;4\n"),
            ColumnLayout::Capped { groups: 2 },
            SampleKind::Float,
        )
        .unwrap_err();
        assert_eq!(
            format_kind(err),
            FormatErrorKind::HeaderMismatch {
                what: "data rows",
                expected: 4,
                got: 0,
            }
        );
    }

    #[test]
    fn all_zero_caps_give_empty_groups() {
        let data = reshape_columnar(
            rows("0;0;0\n"),
            ColumnLayout::Capped { groups: 3 },
            SampleKind::Float,
        )
        .unwrap();
        assert_eq!(data.group_count(), 3);
        assert!(data.series.iter().all(Vec::is_empty));
        assert_eq!(data.caps, Some(vec![0, 0, 0]));
    }

    #[test]
    fn type_table_preserves_row_order() {
        let t = type_table_from_rows(
            rows("#FF0000;Tap root (primary)\n#00FF00;Lateral (secondary)\n"),
            TypeTableShape::ColorLabel,
        )
        .unwrap();
        assert_eq!(t.len(), 2);
        assert_eq!(t.get(0).unwrap().label, "Tap root (primary)");
        assert_eq!(t.get(1).unwrap().color, Some(SeriesColor { r: 0, g: 0xff, b: 0 }));
    }

    #[test]
    fn label_only_table_falls_back_to_cycle() {
        let t = type_table_from_rows(rows("Water\nNitrate\n"), TypeTableShape::LabelOnly).unwrap();
        assert_eq!(t.get(1).unwrap().label, "Nitrate");
        assert_eq!(t.color_or_cycle(1), SeriesColor::cycle(1));
    }

    #[test]
    fn type_table_bad_color_fails() {
        let err = type_table_from_rows(rows("#GG0000;x\n"), TypeTableShape::ColorLabel).unwrap_err();
        assert!(matches!(err, PlotError::Color(_)));
    }

    #[test]
    fn type_table_shorter_than_groups_fails() {
        let t = type_table_from_rows(rows("a\n"), TypeTableShape::LabelOnly).unwrap();
        assert!(t.require(1).is_ok());
        assert_eq!(
            t.require(3).unwrap_err().kind,
            FormatErrorKind::HeaderMismatch {
                what: "type table rows",
                expected: 3,
                got: 1
            }
        );
    }
}
