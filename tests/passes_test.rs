mod common;

use assert2::check;
use common::{CorpusFixture, corpus, run_engine, stage_input};
use confdocs::extract::normalize::normalize_text;
use rstest::rstest;

/// A key absent from the curated subtrees is escalated to the broad pass and
/// found there.
#[rstest]
fn unresolved_keys_escalate_to_pass_two(corpus: CorpusFixture) {
    corpus.write(
        "content/en/agent/host_config.md",
        "- `DD_CHECK_RUNNERS`: The number of check runners the agent process starts.\n",
    );

    let input = stage_input(&[("DD_CHECK_RUNNERS", "golang")]);
    let artifact = run_engine(&corpus, &input);

    check!(artifact.documented_count == 1);
    check!(
        artifact.documented_configurations[0].results[0].source_file.as_deref()
            == Some("content/en/agent/host_config.md:1")
    );
}

/// A key with any pass-1 match is never escalated, even when a perfect
/// description exists in the broader corpus.
#[rstest]
fn keys_with_pass_one_matches_are_never_escalated(corpus: CorpusFixture) {
    // Pass-1 area mentions the key, but the text fails the quality bar.
    corpus.write("content/en/tracing/stub.md", "`DD_CHECK_RUNNERS`\n");
    // Pass-2 area has a perfectly good definition the engine must not see.
    corpus.write(
        "content/en/agent/host_config.md",
        "- `DD_CHECK_RUNNERS`: The number of check runners the agent process starts.\n",
    );

    let input = stage_input(&[("DD_CHECK_RUNNERS", "golang")]);
    let artifact = run_engine(&corpus, &input);

    check!(artifact.documented_count == 0);
    check!(artifact.missing_configurations[0].missing_reasons[0].reason == "quality");
}

/// A key occurring only inside a longer identifier is not matched at all.
#[rstest]
fn token_boundaries_hold_end_to_end(corpus: CorpusFixture) {
    corpus.write(
        "content/en/serverless/secrets.md",
        "Store the key in DD_API_KEY_SECRET_ARN, which specifies a Secrets Manager ARN.\n",
    );

    let input = stage_input(&[("DD_API_KEY", "golang")]);
    let artifact = run_engine(&corpus, &input);

    check!(artifact.documented_count == 0);
    check!(artifact.missing_configurations[0].missing_reasons[0].reason == "not_found");
}

/// Two runs over the same corpus produce byte-identical artifacts, including
/// when files are written in a different order.
#[rstest]
fn reruns_are_byte_identical(corpus: CorpusFixture) {
    corpus.write(
        "content/en/tracing/b.md",
        "`DD_ENV`\n: The environment name used to tag every emitted span and profile.\n",
    );
    corpus.write(
        "content/en/tracing/a.md",
        "- `DD_ENV`: The environment name attached to spans produced by this service.\n",
    );
    corpus.write(
        "content/en/profiler/c.md",
        "| Variable | Description |\n|---|---|\n| `DD_ENV` | The environment name shown on profiles in the app. |\n",
    );

    let input = stage_input(&[("DD_ENV", "golang"), ("DD_VERSION", "golang")]);
    let first = run_engine(&corpus, &input).to_json_bytes().unwrap();
    let second = run_engine(&corpus, &input).to_json_bytes().unwrap();
    check!(first == second);
}

/// Every kept description is literal text from the cited file: the normalized
/// file content contains the normalized description verbatim.
#[rstest]
fn kept_descriptions_are_literal_excerpts(corpus: CorpusFixture) {
    let content =
        "`DD_TRACE_RATE_LIMIT`\n: Maximum number of spans sampled per second, per trace, per service.\n";
    corpus.write("content/en/tracing/limits.md", content);

    let input = stage_input(&[("DD_TRACE_RATE_LIMIT", "golang")]);
    let artifact = run_engine(&corpus, &input);

    let description = &artifact.documented_configurations[0].results[0].description;
    check!(normalize_text(content).contains(description.as_str()));
}

/// YAML and JSON corpus files contribute through the key/value extractors.
#[rstest]
fn structured_data_formats_are_extracted(corpus: CorpusFixture) {
    corpus.write(
        "data/tracing/settings.yaml",
        "settings:\n  - name: DD_PROFILING_ENABLED\n    description: Turns on the continuous profiler for this service, disabled by default.\n",
    );
    corpus.write(
        "content/en/tracing/registry.json",
        "{\n  \"name\": \"DD_LOGS_INJECTION\",\n  \"description\": \"Injects trace identifiers into application logs, correlating logs with traces.\"\n}\n",
    );

    let input = stage_input(&[
        ("DD_PROFILING_ENABLED", "golang"),
        ("DD_LOGS_INJECTION", "golang"),
    ]);
    let artifact = run_engine(&corpus, &input);

    check!(artifact.documented_count == 2);
    let extractors: Vec<&str> = artifact
        .documented_configurations
        .iter()
        .filter_map(|e| e.results[0].extractor.as_deref())
        .collect();
    check!(extractors.contains(&"yaml_scalar"));
    check!(extractors.contains(&"json_value"));
}

/// Code blocks never produce candidates directly; the explanatory paragraph
/// next to them does.
#[rstest]
fn code_context_is_masked(corpus: CorpusFixture) {
    corpus.write(
        "content/en/tracing/setup.md",
        "Set this environment variable to route traces to a remote agent host.\n\n```sh\nexport DD_AGENT_HOST=agent.internal\n```\n",
    );

    let input = stage_input(&[("DD_AGENT_HOST", "golang")]);
    let artifact = run_engine(&corpus, &input);

    check!(artifact.documented_count == 1);
    let result = &artifact.documented_configurations[0].results[0];
    check!(result.extractor.as_deref() == Some("prose_paragraph"));
    check!(result.source_file.as_deref() == Some("content/en/tracing/setup.md:1"));
}
