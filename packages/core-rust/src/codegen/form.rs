//! React Hook Form components in two flavors.
//!
//! Field ids go through [`js_string`] wherever they appear inside a JSX
//! expression; labels, titles and attribute values go through
//! [`escape_html`].

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use super::SourceWriter;
use crate::assemble::assemble;
use crate::config::{CodeFlavor, CodegenConfig};
use crate::field::{Field, FieldKind, FieldType, FormDocument};
use crate::literal::{escape_html, format_number, js_string};

/// Render `document` in the configured flavor.
///
/// # Errors
///
/// Returns an error if the document cannot be serialized for embedding.
pub fn generate_form_code(
    document: &FormDocument,
    config: &CodegenConfig,
) -> Result<String, serde_json::Error> {
    let schema_source = assemble(document).to_source_indented(config.indent_width);
    let schema_literal = if config.include_schema_literal {
        Some(document_literal(document, config.indent_width)?)
    } else {
        None
    };
    let code = match config.flavor {
        CodeFlavor::Zod => format!("{schema_source}\n"),
        CodeFlavor::Html => html_component(document, config, &schema_source, schema_literal.as_deref()),
        CodeFlavor::Shadcn => {
            shadcn_component(document, config, &schema_source, schema_literal.as_deref())
        }
    };
    Ok(code)
}

fn document_literal(document: &FormDocument, indent_width: usize) -> Result<String, serde_json::Error> {
    let indent = " ".repeat(indent_width);
    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(indent.as_bytes()));
    document.serialize(&mut serializer)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

fn required_mark(field: &Field) -> &'static str {
    if field.is_required() {
        " *"
    } else {
        ""
    }
}

/// `name="value"` pairs for the numeric bounds of `number` and `range`.
fn bound_attrs(field: &Field, braced: bool) -> Vec<String> {
    let (min, max, step) = field.numeric_bounds();
    [("min", min), ("max", max), ("step", step)]
        .into_iter()
        .filter_map(|(name, value)| {
            value.map(|v| {
                if braced {
                    format!("{name}={{{}}}", format_number(v))
                } else {
                    format!("{name}=\"{}\"", format_number(v))
                }
            })
        })
        .collect()
}

fn placeholder_attr(field: &Field) -> Option<String> {
    field
        .placeholder()
        .map(|p| format!("placeholder=\"{}\"", escape_html(p)))
}

// ---------------------------------------------------------------------------
// Plain HTML flavor
// ---------------------------------------------------------------------------

fn html_component(
    document: &FormDocument,
    config: &CodegenConfig,
    schema_source: &str,
    schema_literal: Option<&str>,
) -> String {
    let mut w = SourceWriter::new(config.indent_width);
    w.line("/* HTML Form with React Hook Form and Zod Validation */")
        .line("/* Make sure to install required dependencies */")
        .line("")
        .line("import { z } from 'zod';")
        .line("import { useForm } from 'react-hook-form';")
        .line("import { zodResolver } from '@hookform/resolvers/zod';")
        .line("");
    if let Some(literal) = schema_literal {
        w.lines(&format!("const schema = {literal};")).line("");
    }
    w.lines(&format!("const zodSchema = {schema_source};"))
        .line("")
        .line("type FormData = z.infer<typeof zodSchema>;")
        .line("")
        .line("export function DynamicForm() {")
        .indent()
        .line("const form = useForm<FormData>({")
        .indent()
        .line("resolver: zodResolver(zodSchema),")
        .dedent()
        .line("});")
        .line("")
        .line("const onSubmit = (data: FormData) => {")
        .indent()
        .line("console.log(data);")
        .dedent()
        .line("};")
        .line("")
        .line("return (")
        .indent()
        .line("<form onSubmit={form.handleSubmit(onSubmit)}>")
        .indent()
        .line(format!("<h2>{}</h2>", escape_html(&document.form_title)))
        .line(format!("<p>{}</p>", escape_html(&document.form_description)));

    for field in &document.fields {
        let id = js_string(&field.id);
        w.line("<div>")
            .indent()
            .line(format!(
                "<label htmlFor=\"{}\">{}{}</label>",
                escape_html(&field.id),
                escape_html(&field.label),
                required_mark(field)
            ));
        html_input(&mut w, field);
        w.line(format!(
            "{{form.formState.errors[{id}] && <span>{{form.formState.errors[{id}]?.message}}</span>}}"
        ))
        .dedent()
        .line("</div>");
    }

    w.line("<button type=\"submit\">Submit</button>")
        .dedent()
        .line("</form>")
        .dedent()
        .line(");")
        .dedent()
        .line("}");
    w.finish()
}

fn html_input(w: &mut SourceWriter, field: &Field) {
    let register = format!("{{...form.register({})}}", js_string(&field.id));
    let id_attr = format!("id=\"{}\"", escape_html(&field.id));
    let ty = field.field_type();

    match &field.kind {
        FieldKind::Text(_) | FieldKind::Email(_) | FieldKind::Password(_) | FieldKind::Tel(_) => {
            let mut attrs = vec![format!("type=\"{ty}\""), id_attr, register];
            attrs.extend(placeholder_attr(field));
            w.line(format!("<input {} />", attrs.join(" ")));
        }
        FieldKind::Number(_) | FieldKind::Range(_) => {
            let mut attrs = vec![format!("type=\"{ty}\""), id_attr, register];
            attrs.extend(placeholder_attr(field));
            attrs.extend(bound_attrs(field, false));
            w.line(format!("<input {} />", attrs.join(" ")));
        }
        FieldKind::Textarea(_) => {
            let mut attrs = vec![id_attr, register];
            attrs.extend(placeholder_attr(field));
            w.line(format!("<textarea {} />", attrs.join(" ")));
        }
        FieldKind::Select(attrs) => {
            w.line(format!("<select {id_attr} {register}>")).indent();
            let prompt = attrs.placeholder.as_deref().unwrap_or("Select an option");
            w.line(format!("<option value=\"\">{}</option>", escape_html(prompt)));
            for option in &attrs.options {
                w.line(format!(
                    "<option value=\"{}\">{}</option>",
                    escape_html(&option.value),
                    escape_html(&option.label)
                ));
            }
            w.dedent().line("</select>");
        }
        FieldKind::Radio(attrs) | FieldKind::CheckboxGroup(attrs) => {
            let input = if ty == FieldType::Radio { "radio" } else { "checkbox" };
            for option in &attrs.options {
                w.line("<label>")
                    .indent()
                    .line(format!(
                        "<input type=\"{input}\" {register} value=\"{}\" />",
                        escape_html(&option.value)
                    ))
                    .line(escape_html(&option.label))
                    .dedent()
                    .line("</label>");
            }
        }
        FieldKind::Checkbox => {
            w.line(format!("<input type=\"checkbox\" {id_attr} {register} />"));
        }
        FieldKind::Switch => {
            w.line(format!("<input type=\"checkbox\" role=\"switch\" {id_attr} {register} />"));
        }
    }
}

// ---------------------------------------------------------------------------
// shadcn/ui flavor
// ---------------------------------------------------------------------------

const SHADCN_IMPORTS: &str = r#"import { zodResolver } from "@hookform/resolvers/zod"
import { useForm } from "react-hook-form"
import * as z from "zod"

import { Button } from "@/components/ui/button"
import {
  Form,
  FormControl,
  FormField,
  FormItem,
  FormLabel,
  FormMessage,
} from "@/components/ui/form"
import { Input } from "@/components/ui/input"
import { Textarea } from "@/components/ui/textarea"
import {
  Select,
  SelectContent,
  SelectItem,
  SelectTrigger,
  SelectValue,
} from "@/components/ui/select"
import { RadioGroup, RadioGroupItem } from "@/components/ui/radio-group"
import { Checkbox } from "@/components/ui/checkbox"
import { Slider } from "@/components/ui/slider"
import { Switch } from "@/components/ui/switch"
import { Label } from "@/components/ui/label""#;

fn default_value(field: &Field) -> String {
    match &field.kind {
        FieldKind::Checkbox | FieldKind::Switch => "false".to_string(),
        FieldKind::CheckboxGroup(_) => "[]".to_string(),
        FieldKind::Range(attrs) => format_number(attrs.validation.min),
        FieldKind::Number(_) => "undefined".to_string(),
        _ => "\"\"".to_string(),
    }
}

fn shadcn_component(
    document: &FormDocument,
    config: &CodegenConfig,
    schema_source: &str,
    schema_literal: Option<&str>,
) -> String {
    let mut w = SourceWriter::new(config.indent_width);
    w.line("/* Shadcn Form with React Hook Form and Zod Validation */")
        .line("/* Make sure to install required dependencies */")
        .line("")
        .lines(SHADCN_IMPORTS)
        .line("");
    if let Some(literal) = schema_literal {
        w.lines(&format!("const schema = {literal}")).line("");
    }
    w.lines(&format!("const formSchema = {schema_source}"))
        .line("")
        .line("export function DynamicForm() {")
        .indent()
        .line("const form = useForm<z.infer<typeof formSchema>>({")
        .indent()
        .line("resolver: zodResolver(formSchema),")
        .line("defaultValues: {")
        .indent();
    for field in &document.fields {
        w.line(format!("{}: {},", js_string(&field.id), default_value(field)));
    }
    w.dedent()
        .line("},")
        .dedent()
        .line("})")
        .line("")
        .line("function onSubmit(values: z.infer<typeof formSchema>) {")
        .indent()
        .line("console.log(values)")
        .dedent()
        .line("}")
        .line("")
        .line("return (")
        .indent()
        .line("<Form {...form}>")
        .indent()
        .line("<form onSubmit={form.handleSubmit(onSubmit)} className=\"space-y-8\">")
        .indent()
        .line(format!("<h2>{}</h2>", escape_html(&document.form_title)))
        .line(format!("<p>{}</p>", escape_html(&document.form_description)));

    for field in &document.fields {
        shadcn_field(&mut w, field);
    }

    w.line("<Button type=\"submit\">Submit</Button>")
        .dedent()
        .line("</form>")
        .dedent()
        .line("</Form>")
        .dedent()
        .line(")")
        .dedent()
        .line("}");
    w.finish()
}

fn shadcn_field(w: &mut SourceWriter, field: &Field) {
    w.line("<FormField")
        .indent()
        .line("control={form.control}")
        .line(format!("name={{{}}}", js_string(&field.id)))
        .line("render={({ field }) => (")
        .indent()
        .line("<FormItem>")
        .indent()
        .line(format!(
            "<FormLabel>{}{}</FormLabel>",
            escape_html(&field.label),
            required_mark(field)
        ));
    shadcn_control(w, field);
    w.line("<FormMessage />")
        .dedent()
        .line("</FormItem>")
        .dedent()
        .line(")}")
        .dedent()
        .line("/>");
}

fn shadcn_control(w: &mut SourceWriter, field: &Field) {
    let placeholder = escape_html(field.placeholder().unwrap_or(""));
    match &field.kind {
        FieldKind::Text(_) | FieldKind::Email(_) | FieldKind::Password(_) | FieldKind::Tel(_) => {
            w.line("<FormControl>")
                .indent()
                .line(format!(
                    "<Input autoComplete=\"off\" type=\"{}\" placeholder=\"{placeholder}\" {{...field}} />",
                    field.field_type()
                ))
                .dedent()
                .line("</FormControl>");
        }
        FieldKind::Number(_) => {
            let mut attrs = vec![
                "type=\"number\"".to_string(),
                format!("placeholder=\"{placeholder}\""),
            ];
            attrs.extend(bound_attrs(field, true));
            attrs.push("{...field}".to_string());
            attrs.push("onChange={(e) => field.onChange(e.target.value)}".to_string());
            w.line("<FormControl>")
                .indent()
                .line(format!("<Input {} />", attrs.join(" ")))
                .dedent()
                .line("</FormControl>");
        }
        FieldKind::Range(_) => {
            let mut attrs = bound_attrs(field, true);
            attrs.push("value={[field.value]}".to_string());
            attrs.push("onValueChange={(value) => field.onChange(value[0])}".to_string());
            w.line("<FormControl>")
                .indent()
                .line("<div className=\"flex gap-8\">")
                .indent()
                .line(format!("<Slider {} />", attrs.join(" ")))
                .line("<span className=\"text-sm font-bold\">{field.value}</span>")
                .dedent()
                .line("</div>")
                .dedent()
                .line("</FormControl>");
        }
        FieldKind::Textarea(_) => {
            w.line("<FormControl>")
                .indent()
                .line(format!("<Textarea placeholder=\"{placeholder}\" {{...field}} />"))
                .dedent()
                .line("</FormControl>");
        }
        FieldKind::Select(attrs) => {
            let prompt = escape_html(attrs.placeholder.as_deref().unwrap_or("Select an option"));
            w.line("<Select onValueChange={field.onChange} defaultValue={field.value}>")
                .indent()
                .line("<FormControl>")
                .indent()
                .line("<SelectTrigger>")
                .indent()
                .line(format!("<SelectValue placeholder=\"{prompt}\" />"))
                .dedent()
                .line("</SelectTrigger>")
                .dedent()
                .line("</FormControl>")
                .line("<SelectContent>")
                .indent();
            for option in &attrs.options {
                w.line(format!(
                    "<SelectItem value=\"{}\">{}</SelectItem>",
                    escape_html(&option.value),
                    escape_html(&option.label)
                ));
            }
            w.dedent().line("</SelectContent>").dedent().line("</Select>");
        }
        FieldKind::Radio(attrs) => {
            w.line("<FormControl>")
                .indent()
                .line("<RadioGroup onValueChange={field.onChange} defaultValue={field.value}>")
                .indent();
            for option in &attrs.options {
                let item_id = escape_html(&format!("{}-{}", field.id, option.value));
                w.line("<div className=\"flex items-center space-x-2\">")
                    .indent()
                    .line(format!(
                        "<RadioGroupItem value=\"{}\" id=\"{item_id}\" />",
                        escape_html(&option.value)
                    ))
                    .line(format!(
                        "<Label htmlFor=\"{item_id}\">{}</Label>",
                        escape_html(&option.label)
                    ))
                    .dedent()
                    .line("</div>");
            }
            w.dedent().line("</RadioGroup>").dedent().line("</FormControl>");
        }
        FieldKind::CheckboxGroup(attrs) => {
            w.line("<div className=\"flex space-x-2\">").indent();
            for option in &attrs.options {
                let item_id = escape_html(&format!("{}-{}", field.id, option.value));
                let value = js_string(&option.value);
                w.line("<FormControl>")
                    .indent()
                    .line("<div className=\"flex items-center space-x-2\">")
                    .indent()
                    .line("<Checkbox")
                    .indent()
                    .line(format!("id=\"{item_id}\""))
                    .line(format!("checked={{field.value?.includes({value})}}"))
                    .line("onCheckedChange={(checked) => {")
                    .indent()
                    .line("const current = field.value || []")
                    .line(format!(
                        "field.onChange(checked ? [...current, {value}] : current.filter((v) => v !== {value}))"
                    ))
                    .dedent()
                    .line("}}")
                    .dedent()
                    .line("/>")
                    .line(format!(
                        "<Label htmlFor=\"{item_id}\">{}</Label>",
                        escape_html(&option.label)
                    ))
                    .dedent()
                    .line("</div>")
                    .dedent()
                    .line("</FormControl>");
            }
            w.dedent().line("</div>");
        }
        FieldKind::Checkbox => {
            w.line("<FormControl>")
                .indent()
                .line("<Checkbox className=\"block\" checked={field.value} onCheckedChange={field.onChange} />")
                .dedent()
                .line("</FormControl>");
        }
        FieldKind::Switch => {
            w.line("<FormControl>")
                .indent()
                .line("<Switch className=\"block\" checked={field.value} onCheckedChange={field.onChange} />")
                .dedent()
                .line("</FormControl>");
        }
    }
}
