mod common;

use lingual_core::AnyEmptyResult;

#[test]
fn transform_file_resolves_routes() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_project(tmp.path())?;
	let input = tmp.path().join("snippet.md");
	std::fs::write(&input, "Visit [Grammar](grammar:te-form) for /i details\\")?;

	let mut cmd = common::lingual_cmd();
	let _ = cmd
		.arg("transform")
		.arg(&input)
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains(
			r#"Visit <a href="/nihongo/grammar/te-form">Grammar</a> for"#,
		))
		.stdout(predicates::str::contains(
			r#"<div class="note info"><strong class="label">Info:</strong><p>details</p></div>"#,
		));

	Ok(())
}

#[test]
fn transform_reads_stdin() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_project(tmp.path())?;

	let mut cmd = common::lingual_cmd();
	let _ = cmd
		.arg("transform")
		.arg("--path")
		.arg(tmp.path())
		.write_stdin("::bold{漢字[かんじ]}")
		.assert()
		.success()
		.stdout(predicates::str::diff(
			"<strong><ruby>漢字<rt>かんじ</rt></ruby></strong>",
		));

	Ok(())
}

#[test]
fn transform_unknown_route_falls_back() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	let mut cmd = common::lingual_cmd();
	let _ = cmd
		.arg("transform")
		.arg("--path")
		.arg(tmp.path())
		.write_stdin("[Kanji](kanji:water)")
		.assert()
		.success()
		.stdout(predicates::str::contains(r##"<a href="#">Kanji</a>"##))
		.stderr(predicates::str::contains(
			"failed to build url for cross-reference",
		));

	Ok(())
}

#[test]
fn transform_unknown_extension_fails() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("lingual.toml"), "extensions = [\"emoji\"]\n")?;

	let mut cmd = common::lingual_cmd();
	let _ = cmd
		.arg("transform")
		.arg("--path")
		.arg(tmp.path())
		.write_stdin("text")
		.assert()
		.code(2)
		.stderr(predicates::str::contains("unknown extension"));

	Ok(())
}
