//! Tests for batch conversion, formatting and history through the state layer.

use drive_embed::error::EmbedError;
use drive_embed::{
    convert_batch, format_urls, render, AppState, Event, History, HistoryStore, OutputFormat,
    Outcome, Variant,
};
use tempfile::TempDir;

fn share(id: &str) -> String {
    format!("https://drive.google.com/file/d/{}/view?usp=sharing", id)
}

fn convert(state: &mut AppState, input: &str) -> drive_embed::Result<Outcome> {
    state.apply(Event::SetInput(input.to_string()))?;
    state.apply(Event::Convert)
}

mod batches {
    use super::*;

    #[test]
    fn markdown_variant_one() {
        let input = format!("{}\n{}", share("XYZ789"), share("XYZ789"));
        let links = convert_batch(&input, Variant::ExportView).unwrap();
        let out = render(&links, OutputFormat::Markdown, false);
        let needle = "![image](https://drive.google.com/uc?export=view&id=XYZ789)";
        assert_eq!(out.matches(needle).count(), 2);
    }

    #[test]
    fn thumbnail_variant_primary() {
        let links = convert_batch(&share("abc"), Variant::Thumbnail).unwrap();
        assert_eq!(
            render(&links, OutputFormat::Plain, false),
            "https://lh3.googleusercontent.com/d/abc"
        );
    }

    #[test]
    fn labeled_blocks() {
        let input = format!("{}\n{}", share("a"), share("b"));
        let links = convert_batch(&input, Variant::ExportView).unwrap();
        let out = render(&links, OutputFormat::Plain, true);
        assert_eq!(
            out,
            "Preview URL: https://lh3.googleusercontent.com/d/a\n\
             Direct URL: https://drive.google.com/uc?export=view&id=a\n\
             \n\
             Preview URL: https://lh3.googleusercontent.com/d/b\n\
             Direct URL: https://drive.google.com/uc?export=view&id=b"
        );

        let html = render(&links, OutputFormat::Html, true);
        assert!(html.contains(
            "Direct URL: <img src=\"https://drive.google.com/uc?export=view&id=b\" alt=\"image\" />"
        ));
    }

    #[test]
    fn formatting_is_repeatable() {
        let links = convert_batch(&share("abc"), Variant::ExportView).unwrap();
        for format in OutputFormat::ALL {
            assert_eq!(render(&links, format, false), render(&links, format, false));
        }
    }

    #[test]
    fn json_parses_back_to_same_list() {
        let input = ["c3", "a1", "b2"].map(share).join("\n");
        let links = convert_batch(&input, Variant::ExportView).unwrap();
        let urls: Vec<String> = links.iter().map(|l| l.primary.clone()).collect();

        let json = format_urls(&urls, OutputFormat::Json);
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        let back: Vec<String> = serde_json::from_value(parsed["urls"].clone()).unwrap();
        assert_eq!(back, urls);
    }
}

mod state_layer {
    use super::*;

    #[test]
    fn bad_line_rejects_whole_batch() {
        let mut state = AppState::default();
        let input = "https://drive.google.com/file/d/ABC123/view\nnot-a-drive-url";
        let err = convert(&mut state, input).unwrap_err();

        assert!(matches!(err, EmbedError::InvalidUrlFormat(_)));
        assert!(state.output.is_empty());
        assert!(state.converted.is_empty());
        assert!(state.previews.is_empty());
        assert!(state.history.is_empty());
        assert!(state.error.is_some());
    }

    #[test]
    fn failure_resets_previous_output() {
        let mut state = AppState::default();
        convert(&mut state, &share("ok")).unwrap();
        assert!(!state.output.is_empty());

        convert(&mut state, "https://example.com/nope").unwrap_err();
        assert!(state.output.is_empty());
        assert_eq!(state.history.len(), 1);
    }

    #[test]
    fn empty_input_leaves_history_alone() {
        let mut state = AppState::default();
        convert(&mut state, &share("first")).unwrap();

        let err = convert(&mut state, "  \n\n\t\n").unwrap_err();
        assert!(matches!(err, EmbedError::EmptyInput));
        assert_eq!(state.history.len(), 1);
        assert_eq!(state.error.as_deref(), Some(EmbedError::EmptyInput.user_message()));
    }

    #[test]
    fn history_keeps_ten_newest() {
        let mut state = AppState::default();
        for i in 0..12 {
            convert(&mut state, &share(&format!("batch{}", i))).unwrap();
        }

        let originals: Vec<&str> = state.history.entries().map(|e| e.original.as_str()).collect();
        assert_eq!(originals.len(), 10);
        assert_eq!(originals[0], share("batch11"));
        assert_eq!(originals[9], share("batch2"));
    }

    #[test]
    fn history_summarizes_multi_url_batch() {
        let mut state = AppState::default();
        let input = ["a", "b", "c"].map(share).join("\n");
        assert_eq!(convert(&mut state, &input).unwrap(), Outcome::HistoryChanged);

        let entry = state.history.get(0).unwrap();
        assert_eq!(entry.original, format!("{} (+2 more)", share("a")));
        assert_eq!(entry.converted, "https://drive.google.com/uc?export=view&id=a");
    }

    #[test]
    fn previews_follow_output() {
        let mut state = AppState::default();
        state.apply(Event::SetVariant(Variant::Thumbnail)).unwrap();
        convert(&mut state, &share("abc")).unwrap();
        assert_eq!(state.previews.len(), 1);
        assert!(!state.previews[0].is_placeholder());
    }

    #[test]
    fn export_writes_fixed_filename() {
        let dir = TempDir::new().unwrap();
        let mut state = AppState::default();
        state.apply(Event::SetFormat(OutputFormat::Csv)).unwrap();
        convert(&mut state, &share("abc")).unwrap();

        let path = state.export(dir.path()).unwrap();
        assert_eq!(path.file_name().unwrap(), "drive-images.csv");
        assert_eq!(
            std::fs::read_to_string(path).unwrap(),
            "https://drive.google.com/uc?export=view&id=abc"
        );
    }

    #[test]
    fn clear_resets_input_and_output_only() {
        let mut state = AppState::default();
        convert(&mut state, &share("abc")).unwrap();
        state.apply(Event::Clear).unwrap();
        assert!(state.input.is_empty());
        assert!(state.output.is_empty());
        assert_eq!(state.history.len(), 1);

        assert_eq!(state.apply(Event::ClearHistory).unwrap(), Outcome::HistoryChanged);
        assert!(state.history.is_empty());
    }
}

mod history_store {
    use super::*;

    #[test]
    fn missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = HistoryStore::new(dir.path().join("history.json"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn survives_save_and_load() {
        let dir = TempDir::new().unwrap();
        let store = HistoryStore::new(dir.path().join("data").join("history.json"));

        let mut state = AppState::new(History::new());
        convert(&mut state, &share("one")).unwrap();
        convert(&mut state, &share("two")).unwrap();
        store.save(&state.history).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded, state.history);
        assert_eq!(loaded.get(0).unwrap().original, share("two"));
    }

    #[test]
    fn corrupt_file_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(HistoryStore::new(&path).load().is_err());
    }
}
