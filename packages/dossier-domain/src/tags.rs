/// Ordered detection rules; the first matching suffix wins, so more specific
/// suffixes must come before their prefixes (`.tsx` before `.ts`).
pub const TAG_RULES: &[(&str, &str)] = &[
	(".tsx", "React"),
	(".jsx", "React"),
	(".ts", "TypeScript"),
	(".js", "JavaScript"),
	(".py", "Python"),
	(".rs", "Rust"),
	(".go", "Go"),
	(".java", "Java"),
	(".kt", "Kotlin"),
	(".scala", "Scala"),
	(".swift", "Swift"),
	(".rb", "Ruby"),
	(".php", "PHP"),
	(".cpp", "C++"),
	(".cc", "C++"),
	(".c", "C"),
	(".sql", "SQL"),
	(".sh", "Shell"),
	(".yml", "YAML"),
	(".yaml", "YAML"),
	(".json", "JSON"),
	(".md", "Markdown"),
];

pub fn detect_tag(path: &str) -> Option<&'static str> {
	TAG_RULES.iter().find(|(suffix, _)| path.ends_with(suffix)).map(|(_, tag)| *tag)
}
