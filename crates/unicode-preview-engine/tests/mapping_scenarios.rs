use pretty_assertions::assert_eq;
use rstest::rstest;
use unicode_preview_engine::{
    Cursor, Mapper, MatchTuning, StructuralLcsAligner, Strategy, TextStyle, create_mapping,
    resolve_preview_line, stylize,
};

fn fixture(name: &str) -> (String, String) {
    let read = |ext: &str| {
        std::fs::read_to_string(format!(
            "{}/tests/fixtures/{name}.{ext}",
            env!("CARGO_MANIFEST_DIR")
        ))
        .unwrap()
    };
    (read("md"), read("txt"))
}

fn fixture_mapper(name: &str) -> Mapper {
    let (source, target) = fixture(name);
    create_mapping(&source, &target)
}

#[test]
fn identity_maps_every_offset_to_itself() {
    let text = "# Title\n\nSome **bold** text\n\n- item\n";
    let mut mapper = create_mapping(text, text);
    for offset in 0..=text.len() as isize {
        let mapping = mapper.map_offset(offset);
        assert_eq!(mapping.target_offset, offset as usize);
        assert_eq!(mapping.source_line, mapping.target_line);
        assert_eq!(mapping.source_column, mapping.target_column);
    }
}

#[test]
fn styled_rendering_keeps_character_positions() {
    let source = "Some bold text";
    let target = format!("Some {} text", stylize("bold", TextStyle::Bold));
    let mut mapper = create_mapping(source, &target);

    // first and last letter of "bold", then the space after it
    assert_eq!(mapper.map_offset(5).target_offset, 5);
    assert_eq!(mapper.map_offset(8).target_offset, 11);
    assert_eq!(mapper.map_offset(9).target_offset, 13);
}

#[rstest]
#[case(1, 1)]
#[case(7, 10)]
#[case(11, 15)]
fn headings_map_to_rendered_headings(#[case] source_line: usize, #[case] target_line: usize) {
    let mut mapper = fixture_mapper("table_rule");
    assert_eq!(mapper.map_line(source_line).target_line, target_line);
}

#[test]
fn heading_line_anchor_has_full_confidence() {
    let mut mapper = fixture_mapper("table_rule");
    let mapping = mapper.map_line(7);
    assert_eq!(mapping.strategy, Strategy::LineAnchor);
    assert_eq!(mapping.confidence, 1.0);
}

#[test]
fn table_cells_match_their_grid_rows() {
    let mut mapper = fixture_mapper("table_rule");
    assert_eq!(mapper.map_line(3).target_line, 5);
    assert_eq!(mapper.map_line(5).target_line, 7);
    // the delimiter row has no words to match on
    let delimiter = mapper.map_line(4);
    assert_eq!(delimiter.strategy, Strategy::LineAnchor);
    assert_eq!(delimiter.confidence, 0.35);
}

#[test]
fn line_start_cursor_lands_on_the_rendered_heading() {
    let mut mapper = fixture_mapper("table_rule");
    let mapping = mapper.map_cursor(Cursor::new(7, 1));
    assert_eq!(mapping.target_line, 10);
    assert_eq!(mapping.target_column, 1);
    assert_eq!(mapping.target_offset, 84);
    assert_eq!(mapping.source_line, 7);
}

#[test]
fn cursor_inside_a_heading_is_mapped_by_characters() {
    let mut mapper = fixture_mapper("table_rule");
    let mapping = mapper.map_cursor(Cursor::new(7, 4));
    assert_eq!(mapping.source_offset, 44);
    assert_eq!(mapping.target_offset, 84);
    assert_eq!(mapping.target_line, 10);
    assert_eq!(mapping.strategy, Strategy::Diff);
    assert_eq!(mapping.confidence, 0.25);
}

#[test]
fn line_table_is_monotonic() {
    let mut mapper = fixture_mapper("table_rule");
    let lines = mapper.map_lines();
    assert!(lines.windows(2).all(|pair| pair[0] <= pair[1]));
    insta::assert_yaml_snapshot!(lines, @r#"
    - 1
    - 4
    - 5
    - 6
    - 7
    - 8
    - 10
    - 11
    - 16
    - 16
    - 16
    - 17
    "#);
}

#[test]
fn block_below_a_grown_table_is_found_by_line_matching() {
    let mut mapper = fixture_mapper("relocated_heading");
    let mapping = mapper.map_line(10);
    assert_eq!(mapping.target_line, 16);
    assert_eq!(mapping.strategy, Strategy::LineSimilarity);
    assert_eq!(mapping.confidence, 1.0);

    let cursor = mapper.map_cursor(Cursor::new(10, 1));
    assert_eq!(cursor.target_line, 16);
    assert_eq!(cursor.target_offset, 256);
}

#[test]
fn styles_the_normalizer_does_not_know_are_matched_by_words() {
    // the rendered title uses serif bold, which only NFKC folds
    let mut mapper = fixture_mapper("relocated_heading");
    let mapping = mapper.map_line(1);
    assert_eq!(mapping.target_line, 1);
    assert_eq!(mapping.strategy, Strategy::LineSimilarity);
}

fn far_relocation() -> (String, String) {
    let rows: Vec<String> = (2..=41).map(|n| format!("keep row {n}")).collect();
    let moved = "Moved paragraph about quantum gardening".to_string();

    let mut source = vec![moved.clone()];
    source.extend(rows.iter().cloned());
    source.push(String::new());

    let mut target = rows;
    target.push(moved);
    target.push(String::new());

    (source.join("\n"), target.join("\n"))
}

#[test]
fn moved_paragraph_is_found_far_from_its_diff_position() {
    let (source, target) = far_relocation();
    let mut mapper = create_mapping(&source, &target);

    assert_eq!(mapper.map_offset(0).target_line, 1);

    let line = mapper.map_line(1);
    assert_eq!(line.target_line, 41);
    assert_eq!(line.strategy, Strategy::LineSimilarity);
    assert_eq!(line.confidence, 1.0);

    let cursor = mapper.map_cursor(Cursor::new(1, 1));
    assert_eq!(cursor.target_line, 41);
    assert_eq!(cursor.target_offset, 472);
}

#[test]
fn moved_paragraph_holds_the_line_table_floor() {
    let (source, target) = far_relocation();
    let mut mapper = create_mapping(&source, &target);
    let lines = mapper.map_lines();

    assert_eq!(lines.len(), 42);
    assert_eq!(&lines[..3], &[41, 41, 41]);
    assert_eq!(&lines[39..], &[41, 41, 42]);
}

#[test]
fn disabling_line_matching_keeps_the_diff_line() {
    let (source, target) = far_relocation();
    let tuning = MatchTuning {
        window_before: 0,
        window_after: 0,
        ..MatchTuning::default()
    };
    let mut mapper = unicode_preview_engine::create_mapping_with(&source, &target, tuning);
    assert_eq!(mapper.map_line(1).target_line, 1);
}

fn assert_bounded(strategy: Strategy, confidence: f64, query: &str) {
    assert!(
        (0.0..=1.0).contains(&confidence),
        "{query}: confidence {confidence} out of range"
    );
    assert!(
        matches!(
            strategy,
            Strategy::Diff | Strategy::LineAnchor | Strategy::LineSimilarity
        ),
        "{query}: unexpected strategy {strategy}"
    );
}

fn assert_every_answer_is_bounded(mut mapper: Mapper) {
    let len = mapper.source().len() as isize;
    for offset in -3..=len + 3 {
        let mapping = mapper.map_offset(offset);
        assert_bounded(mapping.strategy, mapping.confidence, &format!("offset {offset}"));
        assert!(mapping.target_offset <= mapper.target().len());
    }

    let line_count = mapper.source().line_count();
    for line in (0..=line_count + 2).chain([usize::MAX]) {
        let mapping = mapper.map_line(line);
        assert_bounded(mapping.strategy, mapping.confidence, &format!("line {line}"));

        for column in [0, 1, 2, 50, usize::MAX] {
            let mapping = mapper.map_cursor(Cursor::new(line, column));
            assert_bounded(
                mapping.strategy,
                mapping.confidence,
                &format!("cursor {line}:{column}"),
            );
            assert!(mapping.source_offset <= mapper.source().len());
            assert!(mapping.target_offset <= mapper.target().len());
        }
    }
}

#[rstest]
#[case("table_rule")]
#[case("relocated_heading")]
fn fixture_answers_have_bounded_confidence(#[case] name: &str) {
    assert_every_answer_is_bounded(fixture_mapper(name));
}

#[test]
fn moved_paragraph_answers_have_bounded_confidence() {
    let (source, target) = far_relocation();
    assert_every_answer_is_bounded(create_mapping(&source, &target));
}

#[test]
fn line_sourcemap_resolves_preview_lines() {
    let mut mapper = fixture_mapper("table_rule");
    let data = mapper.sourcemap();
    assert_eq!(data.segments.len(), 12);
    assert_eq!(resolve_preview_line(&data, 7), 10);
    assert_eq!(resolve_preview_line(&data, 11), 16);
}

#[test]
fn structural_mapper_answers_line_queries() {
    let (source, target) = fixture("table_rule");
    let aligner = StructuralLcsAligner::from_markdown(&source, &target);
    let mut mapper = Mapper::with_aligner(&source, &target, aligner, MatchTuning::default());

    let lines = mapper.map_lines();
    assert_eq!(lines.len(), 12);
    assert!(lines.windows(2).all(|pair| pair[0] <= pair[1]));
    assert_eq!(mapper.map_line(1).target_line, 1);
}
