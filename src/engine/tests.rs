//! End-to-end runs against the in-memory hosts.

use super::*;
use crate::common::RGBColor;
use crate::common::blob::fixtures;
use crate::config::items_from_yaml_str;
use crate::extract::SourceRun;
use crate::host::{EmbeddedImage, FrameId, ImageData, Sharing};
use crate::memory::{
    DriveEvent, MemoryCell, MemoryDeck, MemoryDocsApi, MemoryDocument, MemoryDrive, MemoryFetcher,
    MemoryPage, MemoryRange,
};
use crate::style_table::{StyleSetter, StyleValue};

fn run_documents(request: TemplateRequest<'_>) -> (Result<()>, Vec<ProgressEvent>) {
    let mut events = Vec::new();
    let result = sheet_range_to_documents(request, |e| events.push(e.clone()));
    (result, events)
}

fn warnings(events: &[ProgressEvent]) -> Vec<&str> {
    events
        .iter()
        .filter(|e| e.status == ProgressStatus::Warning)
        .map(|e| e.message.as_str())
        .collect()
}

fn names_range() -> MemoryRange {
    MemoryRange::new(["{{name}}", "{{city_noStyle}}"])
        .row([
            MemoryCell::styled("Ada", vec![SourceRun::new(0, 3).bold(true)]),
            MemoryCell::styled("London", vec![SourceRun::new(0, 6).italic(true)]),
        ])
        .row([MemoryCell::text("Grace"), MemoryCell::text("New York")])
        .row([MemoryCell::text("Edsger"), MemoryCell::text("Austin")])
}

#[test]
fn test_more_rows_than_documents() {
    let range = names_range();
    let mut first = MemoryDocument::new("a").paragraph("Dear {{name}} of {{city_noStyle}}");
    let mut second = MemoryDocument::new("b").paragraph("Dear {{name}} of {{city_noStyle}}");

    let request = TemplateRequest::new()
        .with_range(&range)
        .with_document(&mut first)
        .with_document(&mut second);
    let (result, events) = run_documents(request);
    result.unwrap();

    assert_eq!(first.text(0), "Dear Ada of London");
    assert_eq!(second.text(0), "Dear Grace of New York");

    let warnings = warnings(&events);
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("(3)"));
    assert!(warnings[0].contains("(2)"));

    let process: Vec<_> = events
        .iter()
        .filter(|e| e.status == ProgressStatus::Process)
        .map(|e| e.message.as_str())
        .collect();
    assert_eq!(process, [
        "Start: document 1",
        "End: document 1",
        "Start: document 2",
        "End: document 2"
    ]);

    // The noStyle column is never restyled.
    assert_eq!(first.style_calls().len(), 1);
    assert_eq!(first.style_calls()[0].setter, StyleSetter::SetBold);
    assert_eq!((first.style_calls()[0].start, first.style_calls()[0].end_inclusive), (5, 7));
}

#[test]
fn test_more_documents_than_rows() {
    let range = MemoryRange::new(["{{name}}"]).row([MemoryCell::text("Ada")]);
    let mut first = MemoryDocument::new("a").paragraph("{{name}}");
    let mut second = MemoryDocument::new("b").paragraph("{{name}}");
    let request = TemplateRequest::new()
        .with_range(&range)
        .with_documents(vec![
            &mut first as &mut dyn TemplateDocument,
            &mut second as &mut dyn TemplateDocument,
        ]);
    let (result, events) = run_documents(request);
    result.unwrap();

    assert_eq!(first.text(0), "Ada");
    assert_eq!(second.text(0), "{{name}}");
    let warnings = warnings(&events);
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("left unchanged"));
}

#[test]
fn test_duplicate_header_mutates_nothing() {
    let range = MemoryRange::new(["{{a}}", "{{a}}"]).row([MemoryCell::text("1"), MemoryCell::text("2")]);
    let mut doc = MemoryDocument::new("a").paragraph("{{a}}");
    let (result, events) = run_documents(TemplateRequest::new().with_range(&range).with_document(&mut doc));
    assert!(matches!(result, Err(Error::DuplicateHeader(h)) if h == "{{a}}"));
    assert!(events.is_empty());
    assert_eq!(doc.text(0), "{{a}}");
}

#[test]
fn test_request_exclusivity() {
    let range = MemoryRange::new(["{{a}}"]);
    let mut doc = MemoryDocument::new("a");
    let both_sources = TemplateRequest::new()
        .with_range(&range)
        .with_items(Vec::new())
        .with_document(&mut doc);
    assert!(matches!(TemplateApp::new(both_sources), Err(Error::InvalidRequest(_))));

    let no_target = TemplateRequest::new().with_range(&range);
    assert!(matches!(TemplateApp::new(no_target), Err(Error::InvalidRequest(_))));

    let mut deck = MemoryDeck::default();
    let mut doc = MemoryDocument::new("b");
    let both_targets = TemplateRequest::new()
        .with_range(&range)
        .with_document(&mut doc)
        .with_deck(&mut deck);
    assert!(matches!(TemplateApp::new(both_targets), Err(Error::InvalidRequest(_))));
}

#[test]
fn test_missing_objects() {
    let mut doc = MemoryDocument::new("a");
    let request = TemplateRequest::new()
        .with_items(vec![vec![Item::new("{{a}}", "1")]])
        .with_document(&mut doc);
    assert!(matches!(
        TemplateApp::new(request).unwrap().sheet_range_to_documents(|_| {}),
        Err(Error::MissingObject("range"))
    ));

    let range = MemoryRange::new(["{{a}}"]);
    let mut doc = MemoryDocument::new("a");
    let request = TemplateRequest::new().with_range(&range).with_document(&mut doc);
    assert!(matches!(
        sheet_range_to_slides(request, |_| {}),
        Err(Error::MissingObject("slide"))
    ));
}

#[test]
fn test_invalid_link_color_is_rejected() {
    let range = MemoryRange::new(["{{a}}"]);
    let mut doc = MemoryDocument::new("a");
    let request = TemplateRequest::new()
        .with_range(&range)
        .with_document(&mut doc)
        .with_options(TemplateOptions::new().with_link_colors("not a color", "#000000"));
    assert!(matches!(TemplateApp::new(request), Err(Error::Config(_))));
}

#[test]
fn test_style_options() {
    let range = MemoryRange::new(["{{name}}"]).row([MemoryCell::styled("Ada", vec![
        SourceRun::new(0, 3)
            .bold(true)
            .color("#000000")
            .link("https://example.com"),
    ])]);

    let mut plain = MemoryDocument::new("a").paragraph("{{name}}");
    let request = TemplateRequest::new()
        .with_range(&range)
        .with_document(&mut plain)
        .with_options(TemplateOptions::new().with_style_of_spreadsheet(false));
    run_documents(request).0.unwrap();
    assert_eq!(plain.text(0), "Ada");
    assert!(plain.style_calls().is_empty());

    let mut styled = MemoryDocument::new("b").paragraph("{{name}}");
    let request = TemplateRequest::new()
        .with_range(&range)
        .with_document(&mut styled)
        .with_options(TemplateOptions::new().with_excluded_styles(["bold"]));
    run_documents(request).0.unwrap();
    let calls: Vec<_> = styled.style_calls().iter().map(|c| (c.setter, c.value.clone())).collect();
    assert_eq!(calls, vec![
        (StyleSetter::SetForegroundColor, StyleValue::Color(RGBColor::BLACK)),
        (StyleSetter::SetLinkUrl, StyleValue::Link("https://example.com".into())),
        (
            StyleSetter::SetForegroundColor,
            StyleValue::Color(RGBColor::new(0x11, 0x55, 0xcc))
        ),
    ]);
}

#[test]
fn test_document_images_from_links() {
    let range = MemoryRange::new(["{{name}}", "{{photo_image_width:200}}"])
        .row([MemoryCell::text("Ada"), MemoryCell::text("https://e.com/ada.png")]);
    let fetcher = MemoryFetcher::new().with("https://e.com/ada.png", fixtures::png(100, 50));
    let mut doc = MemoryDocument::new("a")
        .paragraph("{{name}}")
        .paragraph("{{photo_image_width:200}}");
    let request = TemplateRequest::new()
        .with_range(&range)
        .with_document(&mut doc)
        .with_fetcher(&fetcher);
    run_documents(request).0.unwrap();

    assert_eq!(doc.text(1), "");
    let images = doc.inline_images();
    assert_eq!(images.len(), 1);
    assert_eq!((images[0].width, images[0].height), (200.0, 100.0));
}

#[test]
fn test_unresolved_image_is_fatal() {
    let range = MemoryRange::new(["{{photo_image}}"]).row([MemoryCell::text("")]);
    let mut doc = MemoryDocument::new("a").paragraph("{{photo_image}}");
    let (result, _) = run_documents(TemplateRequest::new().with_range(&range).with_document(&mut doc));
    assert!(matches!(
        result,
        Err(Error::ImageNotFound { placeholder }) if placeholder == "{{photo_image}}"
    ));
}

#[test]
fn test_failure_keeps_earlier_documents_changed() {
    let range = MemoryRange::new(["{{name}}", "{{photo_image}}"])
        .row([MemoryCell::text("Ada"), MemoryCell::text("https://e.com/ada.png")])
        .row([MemoryCell::text("Grace"), MemoryCell::text("")]);
    let fetcher = MemoryFetcher::new().with("https://e.com/ada.png", fixtures::png(8, 8));
    let mut first = MemoryDocument::new("a").paragraph("{{name}} {{photo_image}}");
    let mut second = MemoryDocument::new("b").paragraph("{{name}} {{photo_image}}");

    let request = TemplateRequest::new()
        .with_range(&range)
        .with_document(&mut first)
        .with_document(&mut second)
        .with_fetcher(&fetcher);
    let (result, _) = run_documents(request);
    assert!(matches!(
        result,
        Err(Error::ImageNotFound { placeholder }) if placeholder == "{{photo_image}}"
    ));

    assert_eq!(first.text(0), "Ada ");
    assert_eq!(first.inline_images().len(), 1);
    assert_eq!(second.text(0), "Grace {{photo_image}}");
    assert!(second.inline_images().is_empty());
}

#[test]
fn test_placeholder_images_need_docs_api() {
    let range = MemoryRange::new(["{{photo_image}}"]).row([MemoryCell::text("https://e.com/a.png")]);
    let mut doc = MemoryDocument::new("a");
    let request = TemplateRequest::new()
        .with_range(&range)
        .with_document(&mut doc)
        .with_options(TemplateOptions::new().with_image_as_placeholder(true));
    let (result, _) = run_documents(request);
    assert!(matches!(result, Err(Error::DocsApiUnavailable)));
}

#[test]
fn test_placeholder_images_in_documents() {
    let blob = fixtures::png(4, 4);
    let range = MemoryRange::new(["{{name}}", "{{logo_image}}"])
        .row([MemoryCell::text("Ada"), MemoryCell::image(blob)]);
    let mut docs = MemoryDocsApi::new().with_images("doc-1", vec![EmbeddedImage {
        object_id: "kix.9".into(),
        title: Some("{{logo_image}}".into()),
        content_uri: None,
    }]);
    let mut drive = MemoryDrive::new();
    let mut doc = MemoryDocument::new("doc-1").paragraph("{{name}} {{logo_image}}");

    let request = TemplateRequest::new()
        .with_range(&range)
        .with_document(&mut doc)
        .with_docs_api(&mut docs)
        .with_drive(&mut drive)
        .with_options(TemplateOptions::new().with_image_as_placeholder(true));
    run_documents(request).0.unwrap();

    // The text token is left alone; the titled object is swapped.
    assert_eq!(doc.text(0), "Ada {{logo_image}}");
    assert!(doc.inline_images().is_empty());
    assert_eq!(docs.requests("doc-1").len(), 1);
    assert_eq!(docs.requests("doc-1")[0].image_object_id, "kix.9");

    let scratch = drive.created_documents()[0].clone();
    assert_eq!(drive.sharing(&scratch), Some(Sharing::Private));
    assert_eq!(drive.events().last(), Some(&DriveEvent::Trashed(scratch)));
}

#[test]
fn test_rows_to_pages() {
    let range = MemoryRange::new(["{{title}}", "{{pic_image}}"])
        .row([MemoryCell::text("One"), MemoryCell::text("https://e.com/1.png")])
        .row([MemoryCell::text("Two"), MemoryCell::text("https://e.com/2.png")]);
    let page = || {
        MemoryPage::new()
            .shape("{{title}}", 0.0, 0.0)
            .shape("{{pic_image}}", 40.0, 50.0)
    };
    let mut deck = MemoryDeck::new(vec![page(), page(), page()]);

    let mut events = Vec::new();
    let request = TemplateRequest::new().with_range(&range).with_deck(&mut deck);
    sheet_range_to_slides(request, |e| events.push(e.clone())).unwrap();

    let first = deck.page(0).unwrap();
    assert_eq!(first.frame_text(FrameId::Shape(0)), "One");
    assert_eq!(first.image_records()[0].data, ImageData::Url("https://e.com/1.png".into()));
    assert_eq!((first.image_records()[0].left, first.image_records()[0].top), (40.0, 50.0));
    assert!((first.image_records()[0].width - 512.0 / 1.33333).abs() < 0.01);
    assert_eq!(deck.page(1).unwrap().frame_text(FrameId::Shape(0)), "Two");
    assert_eq!(deck.page(2).unwrap().frame_text(FrameId::Shape(0)), "{{title}}");

    assert_eq!(events[0].message, "Start: page 1 in a slide deck");
    let warnings = warnings(&events);
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("the remaining 1 pages were left unchanged"));
}

#[test]
fn test_rows_to_decks() {
    let range = MemoryRange::new(["{{title}}"])
        .row([MemoryCell::text("One")])
        .row([MemoryCell::text("Two")])
        .row([MemoryCell::text("Three")]);
    let mut first = MemoryDeck::new(vec![MemoryPage::new().shape("{{title}}", 0.0, 0.0)]);
    let mut second = MemoryDeck::new(vec![
        MemoryPage::new().shape("{{title}}", 0.0, 0.0),
        MemoryPage::new().shape("{{title}}", 0.0, 0.0),
    ]);

    let mut events = Vec::new();
    let request = TemplateRequest::new()
        .with_range(&range)
        .with_deck(&mut first)
        .with_deck(&mut second)
        .with_options(TemplateOptions::new().with_rows_to_each_page(false));
    sheet_range_to_slides(request, |e| events.push(e.clone())).unwrap();

    assert_eq!(first.page(0).unwrap().frame_text(FrameId::Shape(0)), "One");
    assert_eq!(second.page(0).unwrap().frame_text(FrameId::Shape(0)), "Two");
    // Only the first page of a deck is filled.
    assert_eq!(second.page(1).unwrap().frame_text(FrameId::Shape(0)), "{{title}}");
    assert_eq!(events[0].message, "Start: slide deck 1");
    assert_eq!(warnings(&events).len(), 1);
}

#[test]
fn test_placeholder_images_on_slides() {
    let range = MemoryRange::new(["{{pic_image}}"]).row([MemoryCell::text("https://e.com/p.png")]);
    let mut deck = MemoryDeck::new(vec![
        MemoryPage::new()
            .image("{{pic_image}}", 5.0, 6.0, 70.0, 80.0)
            .image("{{pic_image}}", 0.0, 0.0, 10.0, 10.0),
    ]);
    let request = TemplateRequest::new()
        .with_range(&range)
        .with_deck(&mut deck)
        .with_options(TemplateOptions::new().with_image_as_placeholder(true));
    sheet_range_to_slides(request, |_| {}).unwrap();

    let images = deck.page(0).unwrap().image_records();
    assert!(images.iter().all(|i| i.data == ImageData::Url("https://e.com/p.png".into())));
    assert_eq!((images[0].width, images[0].height), (70.0, 80.0));
}

#[test]
fn test_values_to_documents_from_yaml() {
    let items = items_from_yaml_str(
        "- - search: '{{name}}'\n    replace: Ada\n- - search: '{{name}}'\n    replace: Grace\n",
    )
    .unwrap();
    let mut first = MemoryDocument::new("a").paragraph("Hi {{name}}");
    let mut second = MemoryDocument::new("b").paragraph("Hi {{name}}");
    let mut events = Vec::new();
    let request = TemplateRequest::new()
        .with_items(items)
        .with_document(&mut first)
        .with_document(&mut second);
    values_to_documents(request, |e| events.push(e.clone())).unwrap();

    assert_eq!(first.text(0), "Hi Ada");
    assert_eq!(second.text(0), "Hi Grace");
    assert!(warnings(&events).is_empty());
    assert!(first.style_calls().is_empty());
}

#[test]
fn test_values_to_slides_with_image_item() {
    let items = vec![vec![
        Item::new("{{caption}}", "Logo"),
        Item::new("{{logo_width:300}}", fixtures::png(300, 150)),
    ]];
    let mut deck = MemoryDeck::new(vec![
        MemoryPage::new()
            .shape("{{caption}}", 0.0, 0.0)
            .shape("{{logo_width:300}}", 10.0, 20.0),
    ]);
    let request = TemplateRequest::new().with_items(items).with_deck(&mut deck);
    values_to_slides(request, |_| {}).unwrap();

    let page = deck.page(0).unwrap();
    assert_eq!(page.frame_text(FrameId::Shape(0)), "Logo");
    let image = &page.image_records()[0];
    assert!((image.width - 225.0).abs() < 0.01);
    assert!((image.height - 112.5).abs() < 0.01);
}

#[test]
fn test_values_with_empty_search_fail() {
    let mut doc = MemoryDocument::new("a").paragraph("{{a}}");
    let request = TemplateRequest::new()
        .with_items(vec![vec![Item::new("", "x")]])
        .with_document(&mut doc);
    assert!(matches!(
        values_to_documents(request, |_| {}),
        Err(Error::InvalidItem(_))
    ));
    assert_eq!(doc.text(0), "{{a}}");
}
