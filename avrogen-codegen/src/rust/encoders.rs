//! Binary encoder helper generation for the root record.
//!
//! The helpers embed the schema as JSON and round-trip values through the
//! `apache_avro` datum encoding. Serialized values are resolved against the
//! schema before encoding, which applies union branches, fixed sizes and
//! logical types.

/// Generator for the root record's encoder `impl` block.
pub struct EncoderGenerator<'a> {
    root: &'a str,
    schema_json: &'a str,
}

impl<'a> EncoderGenerator<'a> {
    /// Creates a new encoder generator.
    ///
    /// # Arguments
    /// * `root` - Identifier of the root struct
    /// * `schema_json` - Compact JSON of the schema the struct was generated from
    #[must_use]
    pub fn new(root: &'a str, schema_json: &'a str) -> Self {
        Self { root, schema_json }
    }

    /// Generates the `impl` block.
    #[must_use]
    pub fn generate(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("impl {} {{\n", self.root));
        output.push_str("    /// Avro schema this type was generated from.\n");
        output.push_str(&format!(
            "    pub const SCHEMA_JSON: &'static str = {:?};\n\n",
            self.schema_json
        ));

        output.push_str("    /// Returns the parsed Avro schema.\n");
        output.push_str("    pub fn schema() -> &'static apache_avro::Schema {\n");
        output.push_str(
            "        static SCHEMA: std::sync::OnceLock<apache_avro::Schema> = std::sync::OnceLock::new();\n",
        );
        output.push_str("        SCHEMA.get_or_init(|| {\n");
        output.push_str("            apache_avro::Schema::parse_str(Self::SCHEMA_JSON)\n");
        output.push_str("                .expect(\"embedded schema is valid\")\n");
        output.push_str("        })\n");
        output.push_str("    }\n\n");

        output.push_str("    /// Encodes the value as an Avro datum.\n");
        output.push_str(
            "    pub fn marshal(&self) -> Result<Vec<u8>, apache_avro::Error> {\n",
        );
        output.push_str(
            "        let value = apache_avro::to_value(self)?.resolve(Self::schema())?;\n",
        );
        output.push_str("        apache_avro::to_avro_datum(Self::schema(), value)\n");
        output.push_str("    }\n\n");

        output.push_str("    /// Decodes a value from an Avro datum.\n");
        output.push_str(
            "    pub fn unmarshal(bytes: &[u8]) -> Result<Self, apache_avro::Error> {\n",
        );
        output.push_str("        let mut reader = bytes;\n");
        output.push_str(
            "        let value = apache_avro::from_avro_datum(Self::schema(), &mut reader, None)?;\n",
        );
        output.push_str("        apache_avro::from_value(&value)\n");
        output.push_str("    }\n");
        output.push_str("}\n\n");

        output
    }
}
