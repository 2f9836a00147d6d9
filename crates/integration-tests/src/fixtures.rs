//! Backend JSON bodies, shaped the way the REST backend sends them.

use serde_json::{Value, json};

/// A `/usuario` element. `role` is `"ADMIN"` or `"USUARIO"`.
#[must_use]
pub fn user(id: i64, first_name: &str, email: &str, role: &str) -> Value {
    json!({
        "id": id,
        "nombre": first_name,
        "apellido": "Test",
        "mail": email,
        "celular": "1122334455",
        "rol": role,
    })
}

/// A `/categoria` element.
#[must_use]
pub fn category(id: i64, name: &str) -> Value {
    json!({ "id": id, "nombre": name, "descipcion": format!("{name} caseras") })
}

/// A `/producto` element.
#[must_use]
pub fn product(id: i64, name: &str, price: f64, stock: u32, category_id: i64) -> Value {
    json!({
        "id": id,
        "nombre": name,
        "precio": price,
        "descripcion": null,
        "stock": stock,
        "imagen": "",
        "disponible": true,
        "categoria": { "id": category_id, "nombre": "Pizzas", "descipcion": "" },
    })
}

/// A `/pedido` element with one line per `(product, quantity)`.
#[must_use]
pub fn order(id: i64, owner: &Value, state: &str, date: &str, lines: &[(&Value, u32)]) -> Value {
    let detalles: Vec<Value> = lines
        .iter()
        .map(|(product, quantity)| {
            let price = product.get("precio").and_then(Value::as_f64).unwrap_or(0.0);
            json!({
                "cantidad": quantity,
                "subtotal": price * f64::from(*quantity),
                "productoDto": product,
            })
        })
        .collect();
    let total: f64 = detalles
        .iter()
        .filter_map(|d| d.get("subtotal").and_then(Value::as_f64))
        .sum();

    json!({
        "id": id,
        "fecha": date,
        "estado": state,
        "total": total,
        "formaPago": "EFECTIVO",
        "detalles": detalles,
        "usuarioDto": owner,
    })
}
