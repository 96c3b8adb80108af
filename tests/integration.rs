use std::collections::HashMap;
use std::path::PathBuf;

use expect_test::expect;
use morphlight::{
    compose, highlight, load_settings, resolve_intervals, CachedIntervals, HighlightSettings,
    IntervalStore, LearningStatus, LexicalUnit, OffsetRange, RubySpan, StatusSpan,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load the `[highlight]` table from a fixture directory's settings.toml.
fn fixture_settings(fixture_dir: &str) -> HighlightSettings {
    let fixture_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(fixture_dir);
    load_settings(&fixture_path.join("settings.toml")).highlight()
}

/// Units whose inflection doubles as lemma, with an inflection interval each.
fn units(entries: &[(&str, u32)]) -> Vec<LexicalUnit> {
    entries
        .iter()
        .map(|(inflection, interval)| {
            LexicalUnit::new(*inflection, *inflection).with_inflection_interval(*interval)
        })
        .collect()
}

/// Highlight bracket-shorthand text using the `bracket` fixture.
fn check_bracket(raw: &str, entries: &[(&str, u32)]) -> String {
    highlight(&fixture_settings("bracket"), &units(entries), raw).unwrap()
}

// ---------------------------------------------------------------------------
// Tests: regression texts
// ---------------------------------------------------------------------------

#[test]
fn japanese_sentence_with_rubies() {
    let raw = "（ 刑事[けいじ]） （刑事） 珍[めずら]しく 時間[じかん]が 空[あ]いたので　お 前[まえ]たちの 顔[かお]を　 お前[まえ]たちの 見[み]に 様方[さまかた]が な[b]  思い出[おもいだ]してくれ";
    let actual = check_bracket(
        raw,
        &[
            ("刑事", 0),
            ("お前", 0),
            ("が", 0),
            ("た", 30),
            ("たち", 0),
            ("な", 0),
            ("に", 0),
            ("の", 0),
            ("ので", 0),
            ("を", 0),
            ("時間", 0),
            ("珍しく", 30),
            ("空い", 30),
            ("見", 0),
            ("顔", 0),
            ("方", 1),
            ("思い", 0),
            ("出し", 10),
            ("て", 10),
            ("くれ", 10),
        ],
    );
    let expected = expect![[r#"（<span morph-status="unknown"><ruby>刑事<rt>けいじ</rt></ruby></span>） （<span morph-status="unknown">刑事</span>）<span morph-status="known"><ruby>珍<rt>めずら</rt></ruby>しく</span><span morph-status="unknown"><ruby>時間<rt>じかん</rt></ruby></span><span morph-status="unknown">が</span><span morph-status="known"><ruby>空<rt>あ</rt></ruby>い</span><span morph-status="known">た</span><span morph-status="unknown">ので</span>　<span morph-status="unknown">お<ruby>前<rt>まえ</rt></ruby></span><span morph-status="unknown">たち</span><span morph-status="unknown">の</span><span morph-status="unknown"><ruby>顔<rt>かお</rt></ruby></span><span morph-status="unknown">を</span>　<span morph-status="unknown"><ruby>お前<rt>まえ</rt></ruby></span><span morph-status="unknown">たち</span><span morph-status="unknown">の</span><span morph-status="unknown"><ruby>見<rt>み</rt></ruby></span><span morph-status="unknown">に</span><ruby>様<span morph-status="learning">方</span><rt>さまかた</rt></ruby><span morph-status="unknown">が</span><span morph-status="unknown"><ruby>な<rt>b</rt></ruby></span> <ruby><span morph-status="unknown">思い</span><span morph-status="learning">出</span><rt>おもいだ</rt></ruby><span morph-status="learning">し</span><span morph-status="learning">て</span><span morph-status="learning">くれ</span>"#]];
    expected.assert_eq(&actual);
}

#[test]
fn unit_split_by_whitespace_is_not_found() {
    let actual = check_bracket("そうです ね", &[("そうですね", 0)]);
    let expected = expect![[r#"そうです ね"#]];
    expected.assert_eq(&actual);
}

#[test]
fn status_split_across_ruby_boundaries() {
    let actual = check_bracket(
        "雪[ゆき]が お 留守番[るすばん]  相変[あいか]わらずの",
        &[
            ("雪", 30),
            ("が", 10),
            ("留守", 30),
            ("番", 10),
            ("お", 10),
            ("見事", 30),
            ("腕", 10),
            ("変わら", 10),
            ("だ", 10),
            ("だっ", 10),
            ("ああ", 10),
            ("ず", 10),
            ("た", 10),
            ("相", 10),
        ],
    );
    let expected = expect![[r#"<span morph-status="known"><ruby>雪<rt>ゆき</rt></ruby></span><span morph-status="learning">が</span> <span morph-status="learning">お</span><ruby><span morph-status="known">留守</span><span morph-status="learning">番</span><rt>るすばん</rt></ruby> <ruby><span morph-status="learning">相</span><span morph-status="learning">変</span><rt>あいか</rt></ruby><span morph-status="learning">わら</span><span morph-status="learning">ず</span>の"#]];
    expected.assert_eq(&actual);
}

#[test]
fn unspaced_text_gives_long_ruby_bases() {
    let actual = check_bracket(
        "私は明日[あした]新しい[あたらしい]。",
        &[("私", 30), ("明日", 10)],
    );
    let expected = expect![[r#"<ruby><span morph-status="known">私</span>は<span morph-status="learning">明日</span><rt>あした</rt></ruby><ruby>新しい<rt>あたらしい</rt></ruby>。"#]];
    expected.assert_eq(&actual);
}

#[test]
fn casing_is_preserved() {
    let raw = "Das sind doch die Schädel von den Flüchtlingen, die wir gefunden hatten! Keine Sorge, dein Kopf wird auch schon bald in meiner Sammlung sein.";
    let entries: Vec<(&str, u32)> = [
        "flüchtlingen",
        "sammlung",
        "gefunden",
        "schädel",
        "hatten",
        "meiner",
        "sorge",
        "keine",
        "schon",
        "kopf",
        "auch",
        "bald",
        "dein",
        "doch",
        "sein",
        "sind",
        "wird",
        "das",
        "den",
        "die",
        "von",
        "wir",
        "in",
    ]
    .into_iter()
    .map(|inflection| (inflection, 0))
    .collect();

    let actual = check_bracket(raw, &entries);
    let expected = expect![[r#"<span morph-status="unknown">Das</span> <span morph-status="unknown">sind</span> <span morph-status="unknown">doch</span> <span morph-status="unknown">die</span> <span morph-status="unknown">Schädel</span> <span morph-status="unknown">von</span> <span morph-status="unknown">den</span> <span morph-status="unknown">Flüchtlingen</span>, <span morph-status="unknown">die</span> <span morph-status="unknown">wir</span> <span morph-status="unknown">gefunden</span> <span morph-status="unknown">hatten</span>! <span morph-status="unknown">Keine</span> <span morph-status="unknown">Sorge</span>, <span morph-status="unknown">dein</span> <span morph-status="unknown">Kopf</span> <span morph-status="unknown">wird</span> <span morph-status="unknown">auch</span> <span morph-status="unknown">schon</span> <span morph-status="unknown">bald</span> <span morph-status="unknown">in</span> <span morph-status="unknown">meiner</span> <span morph-status="unknown">Sammlung</span> <span morph-status="unknown">sein</span>."#]];
    expected.assert_eq(&actual);
}

#[test]
fn units_with_regex_metacharacters_match_literally() {
    let actual = check_bracket(
        "몇...?<div><br></div><div>몇...</div> also 1 > 2, [I think that 2<1] don't forget; (sometimes I do)!",
        &[("?몇", 0), ("몇", 0)],
    );
    let expected = expect![[r#"<span morph-status="unknown">몇</span>...?<div><br></div><div><span morph-status="unknown">몇</span>...</div> also 1 > 2, [I think that 2<1] don't forget; (sometimes I do)!"#]];
    expected.assert_eq(&actual);
}

// ---------------------------------------------------------------------------
// Tests: ruby/status geometries
// ---------------------------------------------------------------------------

#[test]
fn every_ruby_status_geometry() {
    let actual = check_bracket(
        "12345  09876[def]  12345[abc]  12[abc] 34[abc]5  09876[def] 1 23[abc]45  012345[abc]  1234512345[abc]  0123[abc]45  12345777[zyzzzzz]",
        &[("12345", 0), ("777", 0)],
    );
    let expected = expect![[r#"<span morph-status="unknown">12345</span> <ruby>09876<rt>def</rt></ruby> <span morph-status="unknown"><ruby>12345<rt>abc</rt></ruby></span> <span morph-status="unknown"><ruby>12<rt>abc</rt></ruby><ruby>34<rt>abc</rt></ruby>5</span> <ruby>09876<rt>def</rt></ruby> <span morph-status="unknown">1<ruby>23<rt>abc</rt></ruby>45</span> <ruby>0<span morph-status="unknown">12345</span><rt>abc</rt></ruby> <ruby><span morph-status="unknown">12345</span><span morph-status="unknown">12345</span><rt>abc</rt></ruby> <ruby>0<span morph-status="unknown">123</span><rt>abc</rt></ruby><span morph-status="unknown">45</span> <ruby><span morph-status="unknown">12345</span><span morph-status="unknown">777</span><rt>zyzzzzz</rt></ruby>"#]];
    expected.assert_eq(&actual);
}

#[test]
fn ruby_leads_into_status() {
    let actual = check_bracket(
        "文書[ぶんしょ]を 謎解[なぞと]きに",
        &[("に", 100), ("を", 100), ("文書", 0), ("解き", 0), ("謎", 0)],
    );
    let expected = expect![[r#"<span morph-status="unknown"><ruby>文書<rt>ぶんしょ</rt></ruby></span><span morph-status="known">を</span><ruby><span morph-status="unknown">謎</span><span morph-status="unknown">解</span><rt>なぞと</rt></ruby><span morph-status="unknown">き</span><span morph-status="known">に</span>"#]];
    expected.assert_eq(&actual);
}

#[test]
fn compose_keeps_every_tag_nested() {
    let text = "abcdefgh";
    let rubies = vec![RubySpan::new(OffsetRange::new(2, 5), "cde", "x")];
    let statuses = vec![
        StatusSpan::new(OffsetRange::new(0, 3), LearningStatus::Known),
        StatusSpan::new(OffsetRange::new(4, 7), LearningStatus::Learning),
    ];
    let actual = compose(text, rubies, statuses).unwrap();
    let expected = expect![[r#"<span morph-status="known">ab</span><ruby><span morph-status="known">c</span>d<span morph-status="learning">e</span><rt>x</rt></ruby><span morph-status="learning">fg</span>h"#]];
    expected.assert_eq(&actual);
}

// ---------------------------------------------------------------------------
// Tests: settings and interval lookup
// ---------------------------------------------------------------------------

#[test]
fn html_ruby_with_default_settings() {
    let actual = highlight(
        &HighlightSettings::default(),
        &units(&[("漢字", 30), ("を", 10), ("読む", 0)]),
        "<ruby>漢字<rt>かんじ</rt></ruby>を<ruby><rb>読</rb><rt>よ</rt></ruby>む",
    )
    .unwrap();
    let expected = expect![[r#"<span morph-status="known"><ruby>漢字<rt>かんじ</rt></ruby></span><span morph-status="learning">を</span><span morph-status="unknown"><ruby>読<rt>よ</rt></ruby>む</span>"#]];
    expected.assert_eq(&actual);
}

/// Review history keyed by lemma only.
struct LemmaHistory(HashMap<&'static str, u32>);

impl IntervalStore for LemmaHistory {
    fn inflection_interval(&self, _lemma: &str, _inflection: &str) -> Option<u32> {
        None
    }

    fn lemma_interval(&self, lemma: &str) -> Option<u32> {
        self.0.get(lemma).copied()
    }
}

#[test]
fn highlight_based_on_lemma() {
    let settings = fixture_settings("lemma");
    assert!(!settings.evaluate_inflection);

    let store = CachedIntervals::new(LemmaHistory(HashMap::from([
        ("hello", 30),
        ("world", 10),
    ])));
    let mut units = vec![
        LexicalUnit::new("hello", "hello"),
        LexicalUnit::new("world", "World"),
    ];
    resolve_intervals(&store, &mut units, &settings);

    let actual = highlight(&settings, &units, "hello World").unwrap();
    let expected = expect![[r#"<span morph-status="known">hello</span> <span morph-status="learning">World</span>"#]];
    expected.assert_eq(&actual);
}

#[test]
fn missing_fixture_falls_back_to_defaults() {
    let settings = fixture_settings("does-not-exist");
    assert_eq!(settings, HighlightSettings::default());
}
