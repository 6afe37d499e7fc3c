//! HTML markup for a rendered table.

use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};

use crate::column::{Align, Width};
use crate::error::EmitError;
use crate::node::{CellContent, Node, value_text};
use crate::pagination::PaginationControl;
use crate::rows::RowUnit;
use crate::table::RenderedTable;

type Result<T> = std::result::Result<T, EmitError>;

/// Emit `<table>` markup. All text and attribute values are escaped.
pub fn to_html(table: &RenderedTable) -> Result<String> {
    to_html_with_pagination(table, None)
}

/// Emit the table followed by a pagination footer when one is given.
pub fn to_html_with_pagination(
    table: &RenderedTable,
    pagination: Option<&PaginationControl>,
) -> Result<String> {
    let mut xml = Writer::new(Vec::new());

    let mut root = BytesStart::new("table");
    root.push_attribute(("class", table.flags.classes().join(" ").as_str()));
    xml.write_event(Event::Start(root))?;

    write_head(&mut xml, table)?;
    write_body(&mut xml, table)?;

    xml.write_event(Event::End(BytesEnd::new("table")))?;

    if let Some(control) = pagination {
        write_pagination(&mut xml, control)?;
    }

    Ok(String::from_utf8(xml.into_inner())?)
}

fn write_head(xml: &mut Writer<Vec<u8>>, table: &RenderedTable) -> Result<()> {
    xml.write_event(Event::Start(BytesStart::new("thead")))?;
    xml.write_event(Event::Start(BytesStart::new("tr")))?;
    for cell in &table.header {
        let mut th = BytesStart::new("th");
        th.push_attribute(("scope", "col"));
        th.push_attribute(("style", cell_style(cell.align, cell.width).as_str()));
        xml.write_event(Event::Start(th))?;
        xml.write_event(Event::Text(BytesText::new(&cell.title)))?;
        xml.write_event(Event::End(BytesEnd::new("th")))?;
    }
    xml.write_event(Event::End(BytesEnd::new("tr")))?;
    xml.write_event(Event::End(BytesEnd::new("thead")))?;
    Ok(())
}

fn write_body(xml: &mut Writer<Vec<u8>>, table: &RenderedTable) -> Result<()> {
    xml.write_event(Event::Start(BytesStart::new("tbody")))?;
    for row in &table.body {
        match row {
            RowUnit::Data { index, key, cells } => {
                let mut tr = BytesStart::new("tr");
                tr.push_attribute(("data-row", index.to_string().as_str()));
                if let Some(key) = key {
                    tr.push_attribute(("data-key", key.as_str()));
                }
                xml.write_event(Event::Start(tr))?;
                for cell in cells {
                    let mut td = BytesStart::new("td");
                    td.push_attribute(("style", cell_style(cell.align, Width::Auto).as_str()));
                    xml.write_event(Event::Start(td))?;
                    write_content(xml, &cell.content)?;
                    xml.write_event(Event::End(BytesEnd::new("td")))?;
                }
                xml.write_event(Event::End(BytesEnd::new("tr")))?;
            }
            RowUnit::Empty { message, span } => {
                let mut tr = BytesStart::new("tr");
                tr.push_attribute(("class", "table__empty"));
                xml.write_event(Event::Start(tr))?;
                let mut td = BytesStart::new("td");
                td.push_attribute(("colspan", (*span).max(1).to_string().as_str()));
                xml.write_event(Event::Start(td))?;
                xml.write_event(Event::Text(BytesText::new(message)))?;
                xml.write_event(Event::End(BytesEnd::new("td")))?;
                xml.write_event(Event::End(BytesEnd::new("tr")))?;
            }
        }
    }
    xml.write_event(Event::End(BytesEnd::new("tbody")))?;
    Ok(())
}

fn write_content(xml: &mut Writer<Vec<u8>>, content: &CellContent) -> Result<()> {
    match content {
        CellContent::Value(value) => {
            let text = value.as_ref().map(value_text).unwrap_or_default();
            xml.write_event(Event::Text(BytesText::new(&text)))?;
            Ok(())
        }
        CellContent::Node(node) => write_node(xml, node),
    }
}

fn write_node(xml: &mut Writer<Vec<u8>>, node: &Node) -> Result<()> {
    match node {
        Node::Empty => {
            xml.write_event(Event::Text(BytesText::new("")))?;
        }
        Node::Text { text } => {
            xml.write_event(Event::Text(BytesText::new(text)))?;
        }
        Node::Value { value } => {
            xml.write_event(Event::Text(BytesText::new(&value_text(value))))?;
        }
        Node::Badge { text, tone } => {
            let mut span = BytesStart::new("span");
            span.push_attribute(("class", format!("badge badge--{}", tone.as_str()).as_str()));
            xml.write_event(Event::Start(span))?;
            xml.write_event(Event::Text(BytesText::new(text)))?;
            xml.write_event(Event::End(BytesEnd::new("span")))?;
        }
        Node::Button {
            label,
            binding,
            disabled,
        } => {
            let mut button = BytesStart::new("button");
            button.push_attribute(("type", "button"));
            button.push_attribute(("data-action", binding.kind.as_str()));
            if let Some(id) = &binding.record_id {
                button.push_attribute(("data-record-id", id.as_str()));
            }
            button.push_attribute(("data-row", binding.row_index.to_string().as_str()));
            if *disabled {
                button.push_attribute(("disabled", "disabled"));
            }
            xml.write_event(Event::Start(button))?;
            xml.write_event(Event::Text(BytesText::new(label)))?;
            xml.write_event(Event::End(BytesEnd::new("button")))?;
        }
        Node::Group { children } => {
            let mut span = BytesStart::new("span");
            span.push_attribute(("class", "cell-group"));
            xml.write_event(Event::Start(span))?;
            for child in children {
                write_node(xml, child)?;
            }
            xml.write_event(Event::End(BytesEnd::new("span")))?;
        }
    }
    Ok(())
}

fn write_pagination(xml: &mut Writer<Vec<u8>>, control: &PaginationControl) -> Result<()> {
    let mut nav = BytesStart::new("nav");
    nav.push_attribute(("class", "pagination"));
    xml.write_event(Event::Start(nav))?;

    write_page_button(xml, "Previous", control.previous_page())?;

    let mut label = BytesStart::new("span");
    label.push_attribute(("class", "pagination__label"));
    xml.write_event(Event::Start(label))?;
    xml.write_event(Event::Text(BytesText::new(&control.label())))?;
    xml.write_event(Event::End(BytesEnd::new("span")))?;

    write_page_button(xml, "Next", control.next_page())?;

    xml.write_event(Event::End(BytesEnd::new("nav")))?;
    Ok(())
}

fn write_page_button(xml: &mut Writer<Vec<u8>>, text: &str, target: Option<u32>) -> Result<()> {
    let mut button = BytesStart::new("button");
    button.push_attribute(("type", "button"));
    match target {
        Some(page) => button.push_attribute(("data-page", page.to_string().as_str())),
        None => button.push_attribute(("disabled", "disabled")),
    }
    xml.write_event(Event::Start(button))?;
    xml.write_event(Event::Text(BytesText::new(text)))?;
    xml.write_event(Event::End(BytesEnd::new("button")))?;
    Ok(())
}

fn cell_style(align: Align, width: Width) -> String {
    match width.css() {
        Some(width) => format!("text-align:{align};width:{width}"),
        None => format!("text-align:{align}"),
    }
}
