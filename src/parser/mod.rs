// Author: kelexine (https://github.com/kelexine)
// parser/mod.rs -- Heuristic C/C++ function signature matcher
//
// Raw text goes through the joiner (one logical line per declaration), the
// comment extractor and the template masker before each logical line is
// classified by two regexes: constructor/destructor first, then the general
// `rtype name(params) [const] [{]` shape.

pub mod comments;
pub mod joiner;
pub mod locator;
pub mod template;

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::models::FunctionRecord;
use comments::{
    extract_comment_for_function, extract_multiline_comments, is_in_comment_block,
    sync_comments_to_joined_lines,
};
use joiner::join_multiline_declarations;
use template::mask_templates;

pub use locator::{find_function_end_line, find_function_start_line};

pub(crate) static RE_BLOCK_COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"/\*.*?\*/").unwrap());

static RE_LINE_COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"//.*$").unwrap());

// ─────────────────────────────────────────────
// Signature patterns (applied to masked lines)
// ─────────────────────────────────────────────

static RE_FUNCTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^\s*(?P<rtype>\w[\w\s:*\&<>]*?)\s*",
        r"(?P<name>(?:\w+::)*[\w\~]+|operator\s*[\w\[\]\(\)\+\-\*/<>=!\&\|\^%\~]+)",
        r"\s*\((?P<params>[^()]*(?:\([^)]*\)[^()]*)*)\)",
        r"\s*(?P<const>const)?",
        r"\s*(\{)?\s*$",
    ))
    .unwrap()
});

static RE_CTOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^\s*(?P<name>(?:\w+::)?\~?\w+)\s*",
        r"\((?P<params>[^)]*)\)\s*",
        r"(?:\s*:\s*(?P<initlist>[^{}]*))?",
        r"(?P<const>const)?\s*",
        r"\{",
    ))
    .unwrap()
});

static RE_CONTROL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(?:if|else|for|while|switch|case|catch)\b").unwrap());

static RE_TEMPLATE_HEAD: Lazy<Regex> = Lazy::new(|| Regex::new(r"^template\s*(__TPL\d+__)").unwrap());

static RE_TEMPLATE_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\btemplate\s*__TPL\d+__\s*").unwrap());

/// A `template <...>` line waiting for the function it introduces.
#[derive(Default)]
struct PendingTemplate {
    seen: bool,
    params: Option<String>,
}

/// Does a `{` open the body before any code in the following logical lines?
fn body_follows(lines: &[String], from: usize) -> bool {
    for line in &lines[from..] {
        let next = RE_BLOCK_COMMENT.replace_all(line, "");
        let next = next.trim();
        if next.starts_with('{') {
            return true;
        }
        if !(next.is_empty() || next.starts_with("//") || next.starts_with("/*")) {
            return false;
        }
    }
    false
}

fn group<'t>(caps: &Captures<'t>, name: &str) -> &'t str {
    caps.name(name).map_or("", |m| m.as_str())
}

/// Extract every function definition from in-memory source text.
pub fn extract_functions_from_text(content: &str, path: &Path) -> Vec<FunctionRecord> {
    let lines: Vec<&str> = content.lines().collect();
    let multiline_comments = extract_multiline_comments(&lines);
    let joined = join_multiline_declarations(&lines);
    let synced = sync_comments_to_joined_lines(&multiline_comments, lines.len(), &joined.starts);

    let mut functions: Vec<FunctionRecord> = Vec::new();
    let mut pending = PendingTemplate::default();

    for (idx, line) in joined.lines.iter().enumerate() {
        if is_in_comment_block(idx, &synced) {
            continue;
        }

        let masked = mask_templates(line);
        let mut text = masked.text.clone();

        if text.starts_with("template") {
            pending.seen = true;
            let placeholder = RE_TEMPLATE_HEAD
                .captures(text.trim())
                .map(|caps| caps[1].to_string());
            pending.params = placeholder.map(|p| masked.demask(&p));
            if pending.params.is_some() {
                text = RE_TEMPLATE_PREFIX.replace(&text, "").into_owned();
            }
        }

        if RE_CONTROL.is_match(&text) {
            continue;
        }

        let text = RE_BLOCK_COMMENT.replace_all(&text, "");
        let text = RE_LINE_COMMENT.replace(&text, "");
        let text = text.trim_end();

        let (return_type, name, params, is_const) = if let Some(caps) = RE_CTOR.captures(text) {
            (
                String::new(),
                group(&caps, "name"),
                group(&caps, "params"),
                caps.name("const").is_some(),
            )
        } else if let Some(caps) = RE_FUNCTION.captures(text) {
            if !text.trim().ends_with('{') && !body_follows(&joined.lines, idx + 1) {
                debug!("{}: skipping declaration '{}'", path.display(), text);
                continue;
            }
            (
                masked.demask(group(&caps, "rtype").trim()),
                group(&caps, "name"),
                group(&caps, "params"),
                caps.name("const").is_some(),
            )
        } else {
            continue;
        };

        let name = masked.demask(name);
        let params = masked.demask(params.trim());

        let orig_idx = joined.starts[idx];
        let comment = extract_comment_for_function(&lines, orig_idx, &multiline_comments);
        let is_doxygen_comment = comment.trim_start().starts_with("/**") || comment.contains("@brief");

        let occurrence = 1 + functions
            .iter()
            .filter(|f| f.name == name && f.params == params)
            .count();

        let is_template = pending.seen;
        let template_params = if is_template { pending.params.take() } else { None };
        pending = PendingTemplate::default();

        debug!("{}:{} found {} (#{})", path.display(), orig_idx + 1, name, occurrence);

        functions.push(FunctionRecord {
            name,
            return_type,
            params,
            is_const,
            comment,
            is_doxygen_comment,
            source_file: path.to_path_buf(),
            start_line: orig_idx,
            occurrence,
            is_template,
            template_params,
            doxygen: String::new(),
            todo: None,
        });
    }

    functions
}

/// Read `path` and extract its function definitions.
pub fn extract_functions(path: &Path) -> Result<Vec<FunctionRecord>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read source file: {}", path.display()))?;
    Ok(extract_functions_from_text(&content, path))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(code: &str) -> Vec<FunctionRecord> {
        extract_functions_from_text(code, Path::new("<memory>"))
    }

    const PARSER_FIXTURE: &str = r#"
    #ifndef TEST_PARSER_H
    #define TEST_PARSER_H

    /*-------------------------------------------------------
    * Include Section
    *-------------------------------------------------------*/

    #include <iostream>
    #include <string>

    /*-------------------------------------------------------
    * Global VAriables
    *-------------------------------------------------------*/
    int test = 0;

    /*-------------------------------------------------------
     * Doing some commenting on the function
     * ------------------------------------------------------
    */
    void AnothertestFunctionWithParams(double a, int b){
        std::cout << "testFunctionWithParams" << std::endl;
    } /* AnothertestFunctionWithParams() */

    void NoCommentFunction(){
        // no doc
    }

    /* Orphan comment block */
    #include <iostream>

    // This should be ignored during parsing!!!

    void shouldNotHaveComment(){
    }


    /*-----------------------------------------------------------------------------
    * AuthManager::generateRandomToken() -- Generate Random Token for Passwort Reset
    * ----------------------------------------------------------------------------
    */
    String AuthManager::generateRandomToken() {
        return "none";
    } /* AuthManager::generateRandomToken() */


    DefaultEnum::ForTesting AuthManager::randomTestFunction() {
        return DefaultEnum::ForTesting;
    }

    bool generatePasswordResetToken(const char* username) {
        return true;}

    ThisisAClass::ThisisAClass() {}

    ThisisAnotherClass::~ThisisAnotherClass() {}

    bool Function::twoLinedFunctionDefinitionTest(const String &myname, const String &anothername, const String &alsoanothername,
                                const char *outputline, int &simpleInt, int &AnotherSimpleInt) {
        return false;
    }

    /*-----------------------------------------------------------------------------
    * digitalFASTRead(): Function to read a GPIO Pin State as fast alternative to digitalRead()
    * ----------------------------------------------------------------------------
    */
    int digitalFASTRead(uint8_t pin) {
        if (pin == 40) {
            return false;
        }/* if() */
        return state;
    }/* digitalFASTRead() */

    LED::LED(byte pin) : _pin(pin){
    }

    /**-------------------------------------------------------
    * @brief doxygenTestComment
    *-------------------------------------------------------*/
    static void testFunction(int a /* = 1 */) {
        // test function
    } /* testFunction() */

    // return a sub-json struct
    String jsonExtract(const String& json, const String& nameArg){

        while(start < json.length() && next == ' ') { // filters blanks before value if there

        }

        if(next == '\"'){
            start = start + 1;
            stop = json.indexOf('"', start);
        }
        else if(next == '['){
            int count = 1;
            stop = i + 1;
        }
        else if(next == 'f' ){
            int i = start;

            if(json.charAt(i) == 'f' && json.charAt(i + 1) == 'a' && json.charAt(i + 2) == 'l')
            {
                stop = i + 4;
            }
            else {
                stop = i;
            }
        }
        else if(next == '.' || next == '-' || ('0' <= next  && next <= '9')){
            stop = i;
        }
        return json.substring(start, stop);
    }

    // Funktion zum Lesen aus der Datei
    static std::map<std::string, std::vector<uint8_t>> readFromFile() {
        std::map<std::string, std::vector<uint8_t>> dataMap;
        return dataMap;
    }

    // Test Präprocessor directive
    #ifdef TEST_PREPROC
    void testPreProc() {
        //do nothing
    }
    #endif

    /*--------------------------
    * Test braces in second line
    *----------------------------
    */
    void testBracesInSecondLine()
    {
        // do nothing
    }

    class test{
        public:
            test() : operand1(0), operand2(0)
            {
                // Constructor implementation
            }
    }


    /*-----------------------------------------------------------------------------
     * File::File() Assingment Operator
     * ----------------------------------------------------------------------------
     */
    File &operator=(const File &other)
    {
        return *this;
    }


    bool config(IPAddress local_ip, IPAddress gateway, IPAddress subnet, IPAddress dns1 = (uint32_t)0x00000000, IPAddress dns2 = (uint32_t)0x00000000){

        return true;
    }

    ClassExample& operator *= (const ClassExample& q) {
        ClassExample controll(
        return (*this = controll);
    }

    Vector operator + (const float anotherValue) const { /* funtctional -
		description of the function */

        return Vector(a, b, c);
	}

    Vector operator * (const float a, const Vector& b) { return b * a; }
    Vector operator + (const float a, const Vector& b) { return b + a; }

    uint8_t hex_c(uint8_t   n) {    // convert '0'..'9','A'..'F' to 0..15
        return n;
    }

    void            clear() { _last_velocity   = 0; }

    void SSEWrapper::setup(void (*SSEhandleRequest)(AsyncWebServerRequest *request)) {
        // All Webserver Handler Requests has to be specified here

    }

    LED::LED(byte pin /* within pin class there is a commend! */) {
        _pin = pin;
    }

    template <class T> uint16_t  testObject(uint16_t data, const T &value) {return n;}

    template <class T>
    uint16_t  AnotherObjectClassInstance(uint16_t data, const T &value) {return n;}

    template <typename T, typename U> void foo(T t, U u) {}

    #endif // TEST_PARSER_H
    "#;

    #[test]
    fn test_function_parsing_with_comments() {
        let r = extract(PARSER_FIXTURE);
        assert_eq!(r.len(), 30);

        assert_eq!(r[0].name, "AnothertestFunctionWithParams");
        assert!(r[0].comment.contains("Doing some commenting"));
        assert!(!r[0].is_doxygen_comment);
        assert_eq!(r[1].name, "NoCommentFunction");
        assert_eq!(r[1].comment, "");
        assert_eq!(r[2].name, "shouldNotHaveComment");
        assert_eq!(r[2].comment, "");

        assert_eq!(
            r[3].comment,
            "    /*-----------------------------------------------------------------------------\n    \
             * AuthManager::generateRandomToken() -- Generate Random Token for Passwort Reset\n    \
             * ----------------------------------------------------------------------------\n    \
             */"
        );
        assert_eq!(r[3].name, "AuthManager::generateRandomToken");
        assert_eq!(r[3].return_type, "String");
        assert_eq!(r[4].return_type, "DefaultEnum::ForTesting");
        assert_eq!(r[5].return_type, "bool");
        assert_eq!(r[5].params, "const char* username");

        assert_eq!((r[6].name.as_str(), r[6].return_type.as_str(), r[6].params.as_str()), ("ThisisAClass::ThisisAClass", "", ""));
        assert_eq!(
            (r[7].name.as_str(), r[7].return_type.as_str(), r[7].params.as_str()),
            ("ThisisAnotherClass::~ThisisAnotherClass", "", "")
        );

        assert_eq!(r[8].name, "Function::twoLinedFunctionDefinitionTest");
        assert_eq!(r[8].return_type, "bool");
        assert_eq!(
            r[8].params,
            "const String &myname, const String &anothername, const String &alsoanothername, const char *outputline, int &simpleInt, int &AnotherSimpleInt"
        );
        assert_eq!(r[9].name, "digitalFASTRead");
        assert_eq!(r[9].return_type, "int");
        assert_eq!(r[9].params, "uint8_t pin");
        assert_eq!(r[10].name, "LED::LED");
        assert_eq!(r[10].return_type, "");
        assert_eq!(r[10].params, "byte pin");
        assert!(r[11].is_doxygen_comment);
        assert_eq!(r[11].return_type, "static void");

        assert_eq!(r[12].name, "jsonExtract");
        assert_eq!(r[12].return_type, "String");
        assert_eq!(r[12].params, "const String& json, const String& nameArg");
        assert_eq!(r[12].comment, "// return a sub-json struct");
        assert!(!r[12].is_doxygen_comment);
        assert_eq!(r[13].name, "readFromFile");
        assert_eq!(r[13].return_type, "static std::map<std::string, std::vector<uint8_t>>");
        assert_eq!(r[14].name, "testPreProc");
        assert_eq!(r[14].comment, "// Test Präprocessor directive");

        assert_eq!(r[15].name, "testBracesInSecondLine");
        assert_eq!(
            r[15].comment,
            "    /*--------------------------\n    * Test braces in second line\n    *----------------------------\n    */"
        );
        assert_eq!(r[15].return_type, "void");
        assert_eq!(r[15].params, "");
        assert!(!r[15].is_doxygen_comment);

        assert_eq!(r[16].name, "test");
        assert_eq!(r[17].name, "operator=");
        assert_eq!(r[17].params, "const File &other");
        assert_eq!(r[18].name, "config");
        assert_eq!(r[18].return_type, "bool");
        assert_eq!(
            r[18].params,
            "IPAddress local_ip, IPAddress gateway, IPAddress subnet, IPAddress dns1 = (uint32_t)0x00000000, IPAddress dns2 = (uint32_t)0x00000000"
        );
        assert_eq!(r[19].name, "operator *=");
        assert_eq!(r[19].params, "const ClassExample& q");
        assert_eq!(r[20].name, "operator +");
        assert_eq!(r[20].params, "const float anotherValue");
        assert!(r[20].is_const);
        assert_eq!((r[21].name.as_str(), r[21].params.as_str()), ("operator *", "const float a, const Vector& b"));
        assert_eq!(r[21].return_type, "Vector");
        assert_eq!((r[22].name.as_str(), r[22].params.as_str()), ("operator +", "const float a, const Vector& b"));
        assert_eq!(r[22].return_type, "Vector");
        assert_eq!(r[23].name, "hex_c");
        assert_eq!(r[24].name, "clear");
        assert_eq!(r[25].name, "SSEWrapper::setup");
        assert_eq!(r[25].params, "void (*SSEhandleRequest)(AsyncWebServerRequest *request)");
        assert_eq!(r[26].name, "LED::LED");
        assert_eq!(r[26].params, "byte pin");
        assert_eq!(r[26].return_type, "");
        assert!(!r[26].is_doxygen_comment);

        assert_eq!(r[27].name, "testObject");
        assert_eq!(r[27].params, "uint16_t data, const T &value");
        assert_eq!(r[27].return_type, "uint16_t");
        assert_eq!(r[27].template_params.as_deref(), Some("<class T>"));
        assert_eq!(r[28].name, "AnotherObjectClassInstance");
        assert_eq!(r[28].params, "uint16_t data, const T &value");
        assert_eq!(r[28].return_type, "uint16_t");
        assert!(!r[28].is_doxygen_comment);
        assert_eq!(r[28].template_params.as_deref(), Some("<class T>"));
        assert_eq!(r[29].name, "foo");
        assert_eq!(r[29].params, "T t, U u");
        assert_eq!(r[29].return_type, "void");
        assert_eq!(r[29].template_params.as_deref(), Some("<typename T, typename U>"));
        assert!(r[29].is_template);
        assert!(!r[0].is_template);
    }

    #[test]
    fn test_declaration_yields_no_record() {
        assert!(extract("int foo(int a);\n").is_empty());
        let r = extract("int foo(int a) { return a; }\n");
        assert_eq!(r.len(), 1);
        assert_eq!(r[0].name, "foo");
        assert_eq!(r[0].params, "int a");
    }

    #[test]
    fn test_constructor_and_destructor_records() {
        let r = extract("MyClass::MyClass() { }\nMyClass::~MyClass() { }\n");
        assert_eq!(r.len(), 2);
        assert_eq!(r[0].name, "MyClass::MyClass");
        assert_eq!(r[1].name, "MyClass::~MyClass");
        assert!(r.iter().all(|f| f.return_type.is_empty()));
    }

    #[test]
    fn test_operator_name_is_verbatim() {
        let code = "ClassExample& operator *= (const ClassExample& q) {\n    return *this;\n}\n";
        let r = extract(code);
        assert_eq!(r.len(), 1);
        assert_eq!(r[0].name, "operator *=");
        assert_eq!(r[0].return_type, "ClassExample&");
    }

    #[test]
    fn test_duplicate_definitions_get_occurrences() {
        let code = "\
#ifdef ESP32
void setupPins(int a) {
}
#else
void setupPins(int a) {
}
#endif
";
        let r = extract(code);
        assert_eq!(r.len(), 2);
        assert_eq!((r[0].occurrence, r[0].start_line), (1, 1));
        assert_eq!((r[1].occurrence, r[1].start_line), (2, 4));
    }

    #[test]
    fn test_signature_without_following_body_is_skipped() {
        let code = "void later(int a)\nint x = 3;\n";
        assert!(extract(code).is_empty());
        let code = "void later(int a)\n\n// body follows\n{\n}\n";
        assert_eq!(extract(code).len(), 1);
    }

    #[test]
    fn test_control_flow_is_not_a_function() {
        let code = "void run() {\n    while (ready()) {\n    }\n    if (x) {\n    }\n}\n";
        let r = extract(code);
        assert_eq!(r.len(), 1);
        assert_eq!(r[0].name, "run");
    }

    #[test]
    fn test_catch_handler_is_not_a_function() {
        let code = "void load() {\n    try {\n        parse();\n    }\n    catch (std::exception& e) {\n        report(e);\n    }\n}\n";
        let r = extract(code);
        assert_eq!(r.len(), 1);
        assert_eq!(r[0].name, "load");
    }

    #[test]
    fn test_doxygen_comment_detected() {
        let code = "/**\n * @brief Adds numbers.\n */\nint add(int a, int b) {\n    return a + b;\n}\n";
        let r = extract(code);
        assert!(r[0].is_doxygen_comment);
        assert!(r[0].comment.contains("@brief Adds numbers."));
    }

    #[test]
    fn test_extract_functions_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("led.cpp");
        fs::write(&path, "bool LED::read(void) {\n  return true;\n}\n").unwrap();
        let r = extract_functions(&path).unwrap();
        assert_eq!(r.len(), 1);
        assert_eq!(r[0].source_file, path);
        assert!(extract_functions(&dir.path().join("missing.cpp")).is_err());
    }
}
