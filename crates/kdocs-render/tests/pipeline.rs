//! End-to-end rendering through `PageRenderer`.

use kdocs_render::{
    DocMenuEntry, PageParams, PageRenderer, Theme, html_quote, html_requote, render,
};
use pretty_assertions::assert_eq;

const PAGE: &str = r#"<html><head><title>@name@</title><meta name="description" content="@description@"></head>
<body><nav>@menu@</nav>@body@</body></html>"#;

fn template(declarations: &str) -> String {
    format!("{declarations}\n{PAGE}")
}

#[test]
fn quote_then_requote_is_stable() {
    for s in ["", "x", "<&>\"'", "&amp;&#39;", "&&&;;;", "a&#9999999999;b"] {
        let quoted = html_quote(s);
        assert_eq!(html_requote(&quoted), quoted);
    }
}

#[test]
fn setting_heading_records_param() {
    let html = render(
        "<p data-parent=\"@parent@\">@body@</p>",
        "# @parent foo/bar\n\nText.",
        &Theme::default(),
        None,
    );
    assert_eq!(
        html,
        "<p data-parent=\"foo/bar\"><!-- parent foo/bar -->\n<p>Text.</p>\n</p>"
    );
}

#[test]
fn box_opens_and_closes_at_headings() {
    let tmpl = template(
        r#"<aside id="mybox" class="box"><div class="mybox" title="@ARGS@">@BODY@</div></aside>"#,
    );
    let result = PageRenderer::new().render(
        &tmpl,
        "# ~mybox hello\n\nInside.\n\n# ~\n\nOutside.\n",
        &Theme::default(),
        None,
    );
    assert!(result.html.contains(
        "<div class=\"mybox\" title=\"hello\">\n<p>Inside.</p>\n</div>\n<p>Outside.</p>"
    ));
}

#[test]
fn unclosed_box_emits_opening_fragment_only() {
    let tmpl =
        template(r#"<aside id="mybox" class="box"><div class="mybox">@BODY@</div></aside>"#);
    let result = PageRenderer::new().render(
        &tmpl,
        "# ~mybox hello\n\nInside.\n",
        &Theme::default(),
        None,
    );
    assert!(result.html.contains("<div class=\"mybox\">\n<p>Inside.</p>\n</body>"));
    assert!(!result.html.contains("</div>"));
}

#[test]
fn unknown_macro_is_reported_inline() {
    let result =
        PageRenderer::new().render(PAGE, "# @doesnotexist x\n", &Theme::default(), None);
    assert!(result.html.contains(
        "<div class='ui negative message'>Unknown command: @doesnotexist</div>"
    ));
    assert_eq!(result.warnings, vec!["Unknown command: @doesnotexist"]);
}

#[test]
fn bare_youtube_link_becomes_macro() {
    let tmpl = template(r#"<aside id="youtube">[video @ARGS@]</aside>"#);
    let result = PageRenderer::new().render(
        &tmpl,
        "Intro\n\nhttps://youtu.be/abc123\n",
        &Theme::default(),
        None,
    );
    assert!(result.html.contains("[video abc123]"));
}

#[test]
fn bare_video_link_with_crlf_line_endings() {
    let html = render(
        "@body@",
        "Intro\r\n\r\nhttps://youtu.be/abc123\r\n\r\nhttps://vimeo.com/42 \r\n",
        &Theme::default(),
        None,
    );
    assert!(html.contains("https://www.youtube-nocookie.com/embed/abc123"));
    assert!(html.contains("https://player.vimeo.com/video/42"));
}

#[test]
fn bare_youtube_link_uses_builtin_macro() {
    let html = render("@body@", "https://youtu.be/abc123", &Theme::default(), None);
    assert!(html.contains("https://www.youtube-nocookie.com/embed/abc123"));
}

#[test]
fn other_bare_links_are_autolinked_text() {
    let html = render("@body@", "https://example.com/x", &Theme::default(), None);
    assert!(html.contains("https://example.com/x"));
    assert!(!html.contains("negative"));
}

#[test]
fn menu_divider_and_link_validation() {
    let theme = Theme {
        doc_menu: vec![
            DocMenuEntry::link("---", "/x"),
            DocMenuEntry::link("---", "javascript:void(0)"),
            DocMenuEntry::link("Bad", "javascript:alert(1)"),
            DocMenuEntry::link("Docs", "/docs/x"),
            DocMenuEntry::link("Site", "https://example.com"),
        ],
        ..Theme::default()
    };
    let tmpl = template(concat!(
        r#"<aside id="item" class="menu"><li><a href="@LINK@">@NAME@</a></li></aside>"#,
        r#"<aside id="divider" class="menu"><li class="divider"></li></aside>"#,
    ));
    let result = PageRenderer::new().render(&tmpl, "", &theme, None);
    assert!(result.html.contains(concat!(
        "<nav><li class=\"divider\"></li>\n",
        "<div class='ui negative message'>Invalid link: javascript:void(0)</div>\n",
        "<div class='ui negative message'>Invalid link: javascript:alert(1)</div>\n",
        "<li><a href=\"/docs/x\">Docs</a></li>\n",
        "<li><a href=\"https://example.com\">Site</a></li></nav>",
    )));
    assert_eq!(
        result.warnings,
        vec![
            "Invalid link: javascript:void(0)",
            "Invalid link: javascript:alert(1)"
        ]
    );
}

#[test]
fn repeated_asides_concatenate_in_container() {
    let tmpl = template(concat!(
        r#"<aside data-name="note" class="aside"><div class="note">@BODY@</div></aside>"#,
        r#"<aside data-name="note-container" class="box"><section class="notes">@BODY@</section></aside>"#,
        r#"<aside data-name="main-container" class="box"><main>@BODY@</main></aside>"#,
    ));
    let source = "# ~note\n\nfirst\n\n# ~\n\nbody text\n\n# ~note\n\nsecond\n\n# ~\n";
    let result = PageRenderer::new().render(&tmpl, source, &Theme::default(), None);

    assert!(result.html.contains(concat!(
        "<main><!-- aside -->\n<p>body text</p>\n<!-- aside -->\n</main>",
        "<section class=\"notes\"><div class=\"note\">\n<p>first</p>\n</div>",
        "<div class=\"note\">\n<p>second</p>\n</div></section>",
    )));
}

#[test]
fn unknown_command_with_ampersand_escaped_once() {
    let result = PageRenderer::new().render("@body@", "# @a&b\n", &Theme::default(), None);
    assert_eq!(
        result.html,
        "<div class='ui negative message'>Unknown command: @a&amp;b</div>\n"
    );
    assert_eq!(result.warnings, vec!["Unknown command: @a&b"]);
}

#[test]
fn declaration_name_with_whitespace_is_rejected() {
    let tmpl = template(r#"<aside data-name="side bar" class="aside"><p>@BODY@</p></aside>"#);
    let result = PageRenderer::new().render(&tmpl, "# ~side bar\n", &Theme::default(), None);
    assert_eq!(
        result.warnings,
        vec![
            "Declaration name contains whitespace: side bar",
            "Unknown box: ~side"
        ]
    );
}

#[test]
fn declarations_are_stripped_from_template() {
    let tmpl = template(r#"<aside id="hint" class="macro">secret @ARGS@</aside>"#);
    let result = PageRenderer::new().render(&tmpl, "", &Theme::default(), None);
    assert!(result.html.starts_with("<!-- macro hint -->\n<html>"));
    assert!(!result.html.contains("secret"));
}

#[test]
fn template_declarations_override_builtins() {
    let tmpl = template(r#"<aside id="parent" class="setting">[parent=@ARGS@]</aside>"#);
    let result = PageRenderer::new().render(&tmpl, "# @parent up\n", &Theme::default(), None);
    assert!(result.html.contains("[parent=up]"));
}

#[test]
fn raw_html_in_source_is_escaped() {
    let result = PageRenderer::new().render(
        "@body@",
        "<script>alert('x')</script>\n\nHi <b onclick=x>there</b>",
        &Theme::default(),
        None,
    );
    assert!(!result.html.contains("<script>"));
    assert!(!result.html.contains("<b onclick"));
}

#[test]
fn command_arguments_cannot_inject_markup() {
    let tmpl = r#"<aside id="hint"><span title="@ARGS@">@ARGS@</span></aside>@body@"#;
    let result = PageRenderer::new().render(
        tmpl,
        "# @hint <img src=x onerror=alert(1)>\n",
        &Theme::default(),
        None,
    );
    assert!(!result.html.contains("<img"));
    assert!(result.html.contains("<span title=\"&lt;img src=x onerror=alert(1)&gt;\">"));
}

#[test]
fn page_params_override_title() {
    let params = PageParams::from([("name".to_owned(), "Reference".to_owned())]);
    let theme = Theme {
        name: Some("KindScript".to_owned()),
        ..Theme::default()
    };
    let result =
        PageRenderer::new().render(PAGE, "# Detected\n\nDescribed.", &theme, Some(&params));
    assert!(result.html.contains("<title>Reference - KindScript</title>"));
    assert!(result.html.contains("content=\"\""));
}

#[test]
fn detected_title_and_description() {
    let theme = Theme {
        name: Some("KindScript".to_owned()),
        ..Theme::default()
    };
    let result =
        PageRenderer::new().render(PAGE, "# Blocks & Loops\n\nRepeat things.", &theme, None);
    assert!(result.html.contains("<title>Blocks &amp; Loops - KindScript</title>"));
    assert!(result.html.contains("content=\"Repeat things.\""));
}

#[test]
fn missing_placeholders_render_empty() {
    let html = render("[@nope@][@menu@]", "", &Theme::default(), None);
    assert_eq!(html, "[][]");
}
