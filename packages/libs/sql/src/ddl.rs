//! DDL 문장 생성기
//!
//! 테이블/인덱스/트리거/사용자/권한 정의를 DDL 문장으로 컴파일합니다.
//! 하나의 정의가 여러 문장이 될 수 있으므로 (CREATE TABLE 뒤에 체이닝되는
//! CREATE TRIGGER 등) 테이블 계열 연산은 `Vec<Statement>`를 반환합니다.
//! 반환 순서가 곧 실행 순서입니다.
//!
//! CREATE TABLE 본문의 제약 순서는 고정입니다:
//! 컬럼 → PRIMARY KEY → 컬럼별 UNIQUE → FOREIGN KEY.

use serde_json::Value;
use tracing::debug;

use qk_core::schema::{
    ColumnDef, DefaultValue, ForeignKey, GrantDef, IndexDef, TableDef, TriggerContext,
    TriggerDef, UserDef,
};
use qk_core::token::FuncArg;
use qk_core::{Error, Result};

use crate::writer::{Dialect, SqlWriter, Statement};

/// DDL 생성기
#[derive(Debug, Clone, Copy, Default)]
pub struct DdlGenerator {
    dialect: Dialect,
}

impl DdlGenerator {
    /// 새 생성기
    pub fn new(dialect: Dialect) -> Self {
        Self { dialect }
    }

    /// CREATE TABLE (+ 체이닝된 CREATE TRIGGER)
    ///
    /// 인라인 외래키는 테이블 제약으로 hoisting되고, 컬럼의 트리거
    /// 팩토리는 선언 순서대로 호출되어 뒤따르는 문장이 됩니다.
    pub fn create_table(&self, table: &TableDef) -> Result<Vec<Statement>> {
        debug!(table = %table.name, "generating create table");

        let mut w = SqlWriter::new(self.dialect);
        w.push("CREATE TABLE ");
        if table.if_not_exists {
            w.push("IF NOT EXISTS ");
        }
        w.ident(&table.name).push(" ");
        w.open_group();
        w.join(&table.columns, ", ", |w, col| write_column(w, col))?;

        let pk = table.primary_key_columns();
        if !pk.is_empty() {
            w.push(", PRIMARY KEY ");
            w.open_group();
            w.join(&pk, ", ", |w, column| {
                w.ident(column);
                Ok(())
            })?;
            w.close_group();
        }

        for col in table.columns.iter().filter(|c| c.unique) {
            w.push(", CONSTRAINT ");
            w.ident(&format!("uq_{}_{}", table.name, col.name));
            w.push(" UNIQUE ");
            w.open_group();
            w.ident(&col.name);
            w.close_group();
        }

        for fk in table.collected_foreign_keys() {
            w.push(", ");
            write_foreign_key(&mut w, &table.name, &fk)?;
        }
        w.close_group();

        let mut statements = vec![w.finish()];
        let primary = pk.first().copied();
        for col in &table.columns {
            if let Some(factory) = col.trigger {
                let def = factory(&TriggerContext {
                    table: &table.name,
                    column: &col.name,
                    primary_key_column: primary,
                });
                statements.push(self.create_trigger(&def)?);
            }
        }
        Ok(statements)
    }

    /// DROP TABLE
    pub fn drop_table(&self, name: &str, if_exists: bool) -> Result<Statement> {
        let mut w = SqlWriter::new(self.dialect);
        w.push("DROP TABLE ");
        if if_exists {
            w.push("IF EXISTS ");
        }
        w.ident(name);
        Ok(w.finish())
    }

    /// ALTER TABLE ADD COLUMN (+ 체이닝된 ADD CONSTRAINT / CREATE TRIGGER)
    ///
    /// 인라인 외래키는 별도의 `ADD CONSTRAINT` 문장으로 분리됩니다.
    pub fn add_columns(&self, table: &str, columns: &[ColumnDef]) -> Result<Vec<Statement>> {
        debug!(table = %table, count = columns.len(), "generating add columns");

        let mut w = SqlWriter::new(self.dialect);
        w.push("ALTER TABLE ").ident(table).push(" ");
        w.join(columns, ", ", |w, col| {
            w.push("ADD COLUMN ");
            write_column(w, col)
        })?;
        let mut statements = vec![w.finish()];

        for col in columns {
            if let Some(ref reference) = col.references {
                let fk = ForeignKey {
                    name: None,
                    columns: vec![col.name.clone()],
                    ref_table: reference.table.clone(),
                    ref_columns: vec![reference.column_name().to_string()],
                    on_delete: reference.on_delete,
                    on_update: reference.on_update,
                };
                let mut w = SqlWriter::new(self.dialect);
                w.push("ALTER TABLE ").ident(table).push(" ADD ");
                write_foreign_key(&mut w, table, &fk)?;
                statements.push(w.finish());
            }
        }

        for col in columns {
            if let Some(factory) = col.trigger {
                let def = factory(&TriggerContext {
                    table,
                    column: &col.name,
                    primary_key_column: None,
                });
                statements.push(self.create_trigger(&def)?);
            }
        }
        Ok(statements)
    }

    /// ALTER TABLE DROP COLUMN
    pub fn drop_column(&self, table: &str, column: &str) -> Result<Statement> {
        let mut w = SqlWriter::new(self.dialect);
        w.push("ALTER TABLE ")
            .ident(table)
            .push(" DROP COLUMN ")
            .ident(column);
        Ok(w.finish())
    }

    /// ALTER TABLE MODIFY COLUMN
    ///
    /// 인라인 외래키가 달린 정의는 거부됩니다. 참조 변경은 제약을
    /// 내렸다가 다시 거는 별도 마이그레이션으로 처리해야 합니다.
    pub fn change_column(&self, table: &str, column: &ColumnDef) -> Result<Statement> {
        if column.references.is_some() {
            return Err(Error::ChangeColumnReference {
                column: column.name.clone(),
            });
        }

        let mut w = SqlWriter::new(self.dialect);
        w.push("ALTER TABLE ").ident(table).push(" MODIFY COLUMN ");
        write_column(&mut w, column)?;
        Ok(w.finish())
    }

    /// CREATE INDEX
    pub fn create_index(&self, index: &IndexDef) -> Result<Statement> {
        let mut w = SqlWriter::new(self.dialect);
        w.push("CREATE ");
        if index.unique {
            w.push("UNIQUE ");
        }
        w.push("INDEX ").ident(&index.index_name());
        w.push(" ON ").ident(&index.table).push(" ");
        w.open_group();
        w.join(&index.columns, ", ", |w, column| {
            w.ident(column);
            Ok(())
        })?;
        w.close_group();
        Ok(w.finish())
    }

    /// DROP INDEX
    pub fn drop_index(&self, table: &str, name: &str) -> Result<Statement> {
        let mut w = SqlWriter::new(self.dialect);
        w.push("DROP INDEX ").ident(name).push(" ON ").ident(table);
        Ok(w.finish())
    }

    /// CREATE TRIGGER
    pub fn create_trigger(&self, trigger: &TriggerDef) -> Result<Statement> {
        let mut w = SqlWriter::new(self.dialect);
        w.push("CREATE TRIGGER ").ident(&trigger.name);
        w.push(" ")
            .push(trigger.timing.keyword())
            .push(" ")
            .push(trigger.event.keyword());
        w.push(" ON ").ident(&trigger.table);
        w.push(" FOR EACH ROW ").push(&trigger.body);
        Ok(w.finish())
    }

    /// DROP TRIGGER
    pub fn drop_trigger(&self, name: &str, if_exists: bool) -> Result<Statement> {
        let mut w = SqlWriter::new(self.dialect);
        w.push("DROP TRIGGER ");
        if if_exists {
            w.push("IF EXISTS ");
        }
        w.ident(name);
        Ok(w.finish())
    }

    /// CREATE USER
    ///
    /// 비밀번호는 텍스트에 넣지 않고 파라미터로 바인딩합니다.
    pub fn create_user(&self, user: &UserDef) -> Result<Statement> {
        let mut w = SqlWriter::new(self.dialect);
        w.push("CREATE USER ").ident(&user.name);
        if let Some(ref password) = user.password {
            w.push(" IDENTIFIED BY ").bind(Value::from(password.as_str()));
        }
        Ok(w.finish())
    }

    /// DROP USER
    pub fn drop_user(&self, name: &str, if_exists: bool) -> Result<Statement> {
        let mut w = SqlWriter::new(self.dialect);
        w.push("DROP USER ");
        if if_exists {
            w.push("IF EXISTS ");
        }
        w.ident(name);
        Ok(w.finish())
    }

    /// GRANT
    ///
    /// 권한은 대문자로 정규화되고, 대상은 `db.*` 패턴을 허용하기 위해
    /// 인용 없이 그대로 렌더링됩니다. 피부여자는 인용됩니다.
    pub fn grant(&self, grant: &GrantDef) -> Result<Statement> {
        let mut w = SqlWriter::new(self.dialect);
        w.push("GRANT ");
        let privileges: Vec<String> = grant
            .privileges
            .normalized()
            .iter()
            .map(|p| p.to_uppercase())
            .collect();
        w.push(&privileges.join(", "));
        w.push(" ON ");
        w.push(&grant.on.normalized().join(", "));
        w.push(" TO ");
        let grantees = grant.to.normalized();
        w.join(&grantees, ", ", |w, grantee| {
            w.ident(grantee);
            Ok(())
        })?;
        Ok(w.finish())
    }
}

fn write_column(w: &mut SqlWriter, col: &ColumnDef) -> Result<()> {
    col.validate()?;

    w.ident(&col.name).push(" ").push(col.kind.keyword());
    if let Some(length) = col.length {
        w.push(&format!("({length})"));
    }
    if let Some((precision, scale)) = col.precision {
        w.push(&format!("({precision}, {scale})"));
    }
    if col.required {
        w.push(" NOT NULL");
    }
    if col.auto_increment {
        w.push(" AUTO_INCREMENT");
    }
    if let Some(ref default) = col.default {
        w.push(" DEFAULT ");
        write_default(w, default);
    }
    Ok(())
}

/// DEFAULT 절 값 렌더링
///
/// DDL에는 플레이스홀더가 없으므로 값은 전부 인라인 리터럴입니다.
/// 현재 시각 함수는 괄호 없이, 그 외의 함수/raw 표현식은 괄호로
/// 감싸서 렌더링됩니다.
fn write_default(w: &mut SqlWriter, default: &DefaultValue) {
    match default {
        DefaultValue::Null => {
            w.push("NULL");
        }
        DefaultValue::Bool(true) => {
            w.push("TRUE");
        }
        DefaultValue::Bool(false) => {
            w.push("FALSE");
        }
        DefaultValue::Value(value) => {
            w.push(&sql_literal(value));
        }
        DefaultValue::Func(func) if func.is_bare_keyword() => {
            w.push(&func.name);
        }
        DefaultValue::Func(func) => {
            let args: Vec<String> = func
                .args
                .iter()
                .map(|arg| match arg {
                    FuncArg::Column(name) => w.quoted(name),
                    FuncArg::Value(value) => sql_literal(value),
                })
                .collect();
            w.open_group();
            w.push(&func.name);
            w.open_group();
            w.push(&args.join(", "));
            w.close_group();
            w.close_group();
        }
        DefaultValue::Raw(sql) => {
            w.open_group();
            w.push(sql);
            w.close_group();
        }
    }
}

/// 인라인 SQL 리터럴
///
/// 문자열은 작은따옴표로 인용하고 내부 작은따옴표는 두 번 써서
/// 이스케이프합니다. 배열/객체는 JSON 직렬화 후 문자열로 인용됩니다.
fn sql_literal(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Bool(true) => "TRUE".to_string(),
        Value::Bool(false) => "FALSE".to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => format!("'{}'", s.replace('\'', "''")),
        Value::Array(_) | Value::Object(_) => {
            format!("'{}'", value.to_string().replace('\'', "''"))
        }
    }
}

fn write_foreign_key(w: &mut SqlWriter, table: &str, fk: &ForeignKey) -> Result<()> {
    w.push("CONSTRAINT ").ident(&fk.constraint_name(table));
    w.push(" FOREIGN KEY ");
    w.open_group();
    w.join(&fk.columns, ", ", |w, column| {
        w.ident(column);
        Ok(())
    })?;
    w.close_group();
    w.push(" REFERENCES ").ident(&fk.ref_table).push(" ");
    w.open_group();
    w.join(&fk.ref_columns, ", ", |w, column| {
        w.ident(column);
        Ok(())
    })?;
    w.close_group();
    w.push(" ON DELETE ").push(fk.on_delete.keyword());
    w.push(" ON UPDATE ").push(fk.on_update.keyword());
    Ok(())
}
