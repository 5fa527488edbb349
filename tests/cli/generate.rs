use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, stderr, stdout};

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html>
  <body>
    <div id="app" class="card"></div>
    <dom-module id="x-card">
      <template>
        <h2 id="title" class="card"></h2>
      </template>
    </dom-module>
  </body>
</html>
"#;

#[test]
fn test_generate_single_input_defaults_next_to_it() -> Result<()> {
    let test = CliTest::with_file("views/index.html", INDEX_HTML)?;

    let output = test.generate_command().args(["-i", "views/index.html"]).output()?;
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));

    let written = test.root().join("views/index-querymap.d.ts");
    assert_eq!(
        stdout(&output),
        format!("\u{2713} Wrote {} from 1 file\n", written.display())
    );

    let text = test.read_file("views/index-querymap.d.ts")?;
    assert!(text.starts_with("interface SelectorMap {\n\t\"#app\": HTMLDivElement;\n"));
    assert!(text.contains("\t\".card\": HTMLDivElement|HTMLHeadingElement;\n"));
    assert!(text.contains("interface ModuleMap {\n\t\"x-card\": {\n\t\t\"title\": HTMLHeadingElement;\n\t};\n}\n"));
    assert!(text.contains("interface TagMap {\n\t\"x-card\": XCardElement;\n}\n"));
    assert!(!text.contains("export"));

    Ok(())
}

#[test]
fn test_generate_json_to_stdout() -> Result<()> {
    let test = CliTest::with_file("index.html", INDEX_HTML)?;

    let output = test
        .generate_command()
        .args(["-i", "index.html", "--format", "json", "--stdout"])
        .output()?;
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));

    insta::assert_snapshot!(stdout(&output), @r##"
    {
      "selectors": {
        "#app": "HTMLDivElement",
        ".card": "HTMLDivElement|HTMLHeadingElement",
        "x-card": "XCardElement"
      },
      "modules": {
        "x-card": {
          "title": "HTMLHeadingElement"
        }
      },
      "ids": {
        "app": "HTMLDivElement"
      },
      "classes": {
        "card": "HTMLDivElement|HTMLHeadingElement"
      },
      "tags": {
        "x-card": "XCardElement"
      }
    }
    "##);

    Ok(())
}

#[test]
fn test_generate_combined_from_config() -> Result<()> {
    let test = CliTest::with_file(
        ".htmltypingsrc.json",
        r#"{ "input": ["src"], "output": "types/querymap.d.ts", "export": true, "jsxFactory": "h" }"#,
    )?;
    test.write_file("src/a.html", r#"<div id="x" class="fancy"></div>"#)?;
    test.write_file("src/b.pug", "span#x.fancy\ninclude parts/nav\n")?;
    test.write_file("src/parts/nav.pug", "nav#menu")?;
    test.write_file("src/c.tsx", r#"export const C = () => <List<Item> id="list" />;"#)?;
    test.write_file("src/d.js", r#"h("canvas", { id: "paint" });"#)?;

    let output = test.generate_command().output()?;
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("from 5 files"));

    let text = test.read_file("types/querymap.d.ts")?;
    assert!(text.starts_with("export interface SelectorMap {\n"));
    assert!(text.contains("\t\"x\": HTMLSpanElement;\n"));
    assert!(text.contains("\t\"menu\": HTMLElement;\n"));
    assert!(text.contains("\t\"list\": HTMLListElement<Item>;\n"));
    assert!(text.contains("\t\"paint\": HTMLCanvasElement;\n"));
    assert!(text.contains("\t\"fancy\": HTMLDivElement|HTMLSpanElement;\n"));
    assert!(text.contains("export type ModuleIDs<T extends keyof ModuleMap> = ModuleMap[T];\n"));

    Ok(())
}

#[test]
fn test_generate_separate() -> Result<()> {
    let test = CliTest::with_file("a.html", r#"<p id="a"></p>"#)?;
    test.write_file("b.jade", "b#b")?;

    let output = test
        .generate_command()
        .args(["-i", "*.html", "-i", "*.jade", "--separate"])
        .output()?;
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));

    assert!(test.read_file("a-querymap.d.ts")?.contains("\"a\": HTMLParagraphElement;"));
    let b = test.read_file("b-querymap.d.ts")?;
    assert!(b.contains("\"b\": HTMLElement;"));
    assert!(!b.contains("\"a\""));

    Ok(())
}

#[test]
fn test_multiple_inputs_need_output() -> Result<()> {
    let test = CliTest::with_file("a.html", r#"<p id="a"></p>"#)?;
    test.write_file("b.html", r#"<p id="b"></p>"#)?;

    let output = test.generate_command().args(["-i", "."]).output()?;
    assert_eq!(output.status.code(), Some(2));
    assert_eq!(
        stderr(&output),
        "Error: 2 input files found: pass -o/--output or use -s/--separate\n"
    );

    Ok(())
}

#[test]
fn test_no_matching_inputs() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.generate_command().args(["-i", "src/**/*.pug"]).output()?;
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stderr(&output), "warning: no input files matched\n");

    Ok(())
}

#[test]
fn test_parse_error_writes_nothing() -> Result<()> {
    let test = CliTest::with_file("bad.pug", "div\n    p\n  span\n")?;
    test.write_file("good.html", r#"<p id="a"></p>"#)?;

    let output = test
        .generate_command()
        .args(["-i", ".", "-o", "q.d.ts"])
        .output()?;
    assert_eq!(output.status.code(), Some(2));
    let err = stderr(&output);
    assert!(err.starts_with("error: Failed to parse "), "stderr: {}", err);
    assert!(err.ends_with("\u{2718} 1 file failed, nothing written\n"));
    assert!(!test.root().join("q.d.ts").exists());

    Ok(())
}

#[test]
fn test_compiled_js_needs_factory() -> Result<()> {
    let test = CliTest::with_file("bundle.js", r#"h("p", { id: "a" });"#)?;

    let output = test.generate_command().args(["-i", "bundle.js"]).output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("JSX factory needs to be defined"));

    let output = test
        .generate_command()
        .args(["-i", "bundle.js", "-j", "h", "--stdout"])
        .output()?;
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("\"a\": HTMLParagraphElement;"));

    Ok(())
}

#[test]
fn test_compiled_js_recovers_before_syntax_error() -> Result<()> {
    let test = CliTest::with_file("bundle.js", "h('div', { id: 'a' });\nh('p', { id: 'b' }")?;

    let output = test
        .generate_command()
        .args(["-i", "bundle.js", "-j", "h", "--stdout"])
        .output()?;
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(stderr(&output).starts_with("warning: "));
    assert!(stderr(&output).contains("bundle.js: parsing stopped at line 2"));
    let text = stdout(&output);
    assert!(text.contains("\"a\": HTMLDivElement;"));
    assert!(!text.contains("\"b\""));

    Ok(())
}
