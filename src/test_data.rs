#[cfg(test)]
pub const POST_WITH_TOML: &str = r#"+++
title = "What I learned after 20+ years of software development"
is_draft = false
tags = ["software", "career", "software"]
categories = ["opinion"]

[post_publisher]
author = "thiago"
+++

How to be a great software engineer?

Someone asked me this question today and I didn’t have an answer. After thinking for a while, I came up with a list of what I try to do myself.

<!-- more -->

## Non technical

### Have a honest image of yourself
"#;

#[cfg(test)]
pub const POST_MISSING_KEYS: &str = "---
invalid_var: false
foo: 0
---
# Test

paragraph
";

#[cfg(test)]
pub const POST_MISMATCHED_DELIMITERS: &str = "+++
invalid: {}
test_post == 0
---
        # Test
        ";

#[cfg(test)]
pub const POST_TOML_SYNTAX_ERROR: &str = "+++
title: Test
is_draft = true
+++
";

#[cfg(test)]
pub const POST_YAML_SYNTAX_ERROR: &str = "---
title: Test
is_draft = true
---
";

#[cfg(test)]
pub const POST_JSON_SYNTAX_ERROR: &str = r#"{
    "title": "Test",
    "is_draft" = true
}
"#;

#[cfg(test)]
pub const POST_NO_CONTENT: &str = r#"+++
title = "Test"
is_draft = true
+++
"#;
